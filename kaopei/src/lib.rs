pub mod analysis;
pub mod intake;
pub mod models;
pub mod present;
pub mod roast;
pub mod session;
pub mod shared;

pub mod prelude {
    pub use crate::analysis::prelude::*;
    pub use crate::intake::prelude::*;
    pub use crate::models::prelude::*;
    pub use crate::present::prelude::*;
    pub use crate::roast::prelude::*;
    pub use crate::session::prelude::*;
    pub use crate::shared::prelude::*;
}
