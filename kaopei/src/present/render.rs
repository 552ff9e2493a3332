use super::view::{ResultView, SnapshotCard};
use anyhow::Result;
use minijinja::{Environment, context};

const RESULT_TEMPLATE: &str = "Original image: {{ image }}

THE DIRECTOR'S ROAST
{% for line in roast %}{{ line.label }} {{ line.text }}
{% endfor %}
THE DIRECTOR'S CHARITY (ADVICE)
{% for line in advice %}  * {{ line }}
{% endfor %}
THE VERDICT
\"{{ score_comment }}\"";

const SNAPSHOT_TEMPLATE: &str = "+------------------------------------------------+
  LOOK REVIEW SNAPSHOT               #KaoPeiFashion
  SCORE     {{ score }}
  STYLE     {{ style }}
  KEYWORDS  {% for keyword in keywords %}[{{ keyword | upper }}]{% if not loop.last %} {% endif %}{% endfor %}
  - - - - - - - - - - - - - - - - - - - - - - - -
  VERIFIED BY AI DIRECTOR FROM HELL
+------------------------------------------------+";

fn render(name: &str, source: &str, ctx: minijinja::Value) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(name, source)?;
    let template = env.get_template(name)?;

    Ok(template.render(ctx)?)
}

pub fn render_result(view: &ResultView) -> Result<String> {
    render(
        "result",
        RESULT_TEMPLATE,
        context! {
            image => view.image,
            roast => view.roast,
            advice => view.advice,
            score_comment => view.score_comment,
        },
    )
}

pub fn render_snapshot(card: &SnapshotCard) -> Result<String> {
    render(
        "snapshot",
        SNAPSHOT_TEMPLATE,
        context! {
            score => card.score,
            style => card.style,
            keywords => card.keywords,
        },
    )
}
