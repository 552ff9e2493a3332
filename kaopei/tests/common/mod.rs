use assert_cmd::Command;
use assert_cmd::assert::Assert;
use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteStr, PathChild};
use image::{ImageFormat, RgbImage};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const NORMCORE_REVIEW: &str = r#"{"snapshot":{"score":7.5,"style":"Normcore","keywords":["safe","beige","sleepy"]},"roast":["Beige on beige on beige.","You look like a loading screen.","This outfit has the energy of a tax form.","Even the wall behind you is more daring.","Your shoes are in witness protection.","The fit whispers, and nobody listens."],"advice":["Add one colour, any colour.","Tailor the trousers.","Swap the sneakers for loafers.","Accessorise like you mean it."],"scoreComment":"Solid 7.5: like tap water, nobody complains, nobody remembers."}"#;

pub struct KaopeiTestHelper<'a> {
    pub work_dir: TempDir,
    name: &'a str,
    counter: AtomicUsize,
}

impl<'a> KaopeiTestHelper<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            work_dir: TempDir::new().unwrap(),
            name,
            counter: AtomicUsize::new(0),
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("kaopei").unwrap();
        cmd.current_dir(self.work_dir.path())
            .env(
                "KAOPEI_RUN_ID",
                format!(
                    "{}-{}",
                    self.name,
                    self.counter.fetch_add(1, Ordering::Relaxed)
                ),
            )
            .env("KAOPEI_OUTPUT_PROGRESS", "plain")
            .env("NO_COLOR", "1")
            .env("HOME", self.work_dir.path())
            .env("XDG_CONFIG_HOME", self.work_dir.path().join(".config"))
            .env_remove("GEMINI_API_KEY")
            .env_remove("API_KEY")
            .env_remove("KAOPEI_API_BASE_URL")
            .env_remove("KAOPEI_MODEL")
            .env_remove("KAOPEI_CONFIG_DIR");
        cmd
    }

    pub fn run_command(&self, args: &[&str]) -> Assert {
        self.command().args(args).assert()
    }

    /// `roast --yes <image>` against a fake Gemini endpoint.
    pub fn roast(&self, base_url: &str, image: &str, extra: &[&str]) -> Assert {
        let mut args = vec![
            "roast",
            "--yes",
            "--api-key",
            "test-key",
            "--api-base-url",
            base_url,
            image,
        ];
        args.extend_from_slice(extra);
        self.run_command(&args)
    }

    pub fn write_file(&self, path: &str, contents: &str) {
        self.work_dir.child(path).write_str(contents).unwrap();
    }

    /// A real image of `format`, padded with trailing bytes up to `size_bytes`.
    pub fn write_image(&self, name: &str, format: ImageFormat, size_bytes: u64) -> PathBuf {
        let path = self.work_dir.path().join(name);
        RgbImage::from_pixel(64, 96, image::Rgb([210, 190, 160]))
            .save_with_format(&path, format)
            .unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        let current = file.metadata().unwrap().len();
        if size_bytes > current {
            file.write_all(&vec![0u8; (size_bytes - current) as usize])
                .unwrap();
        }

        path
    }

    /// A file of `size_bytes` that is not an image at all.
    pub fn write_blob(&self, name: &str, size_bytes: u64) -> PathBuf {
        let path = self.work_dir.path().join(name);
        std::fs::File::create(&path)
            .unwrap()
            .set_len(size_bytes)
            .unwrap();
        path
    }

    pub fn clean_work_dir(self) {
        self.work_dir.close().unwrap();
    }
}

/// Body of a `generateContent` answer whose only text part is `text`.
pub fn gemini_reply(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}
