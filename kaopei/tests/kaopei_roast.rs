#[allow(dead_code)]
mod common;

use common::*;
use image::ImageFormat;
use kaopei::prelude::SERVICE_FAILURE_MESSAGE;
use mockito::Matcher;
use predicates::prelude::*;

const GENERATE_PATH: &str = "/gemini-2.5-flash:generateContent";

#[test]
fn test_normcore_review_is_shown() {
    let helper = KaopeiTestHelper::new("test_normcore_review_is_shown");
    helper.write_image("ootd.jpg", ImageFormat::Jpeg, 2 * 1024 * 1024);

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "generationConfig": { "responseMimeType": "application/json", "temperature": 1.2 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_reply(NORMCORE_REVIEW))
        .expect(1)
        .create();

    helper
        .roast(&server.url(), "ootd.jpg", &[])
        .success()
        .stdout(predicate::str::contains("ootd.jpg (image/jpeg, 64x96, 2.0 MB)"))
        .stdout(predicate::str::contains("01. Beige on beige on beige."))
        .stdout(predicate::str::contains("06. The fit whispers, and nobody listens."))
        .stdout(predicate::str::contains("  * Tailor the trousers."))
        .stdout(predicate::str::contains("SCORE     7.5 / 10"))
        .stdout(predicate::str::contains("STYLE     Normcore"))
        .stdout(predicate::str::contains("[SAFE] [BEIGE] [SLEEPY]"))
        .stdout(predicate::str::contains("#KaoPeiFashion"))
        .stdout(predicate::str::contains("VERIFIED BY AI DIRECTOR FROM HELL"));

    mock.assert();
    helper.clean_work_dir();
}

#[test]
fn test_json_output_is_the_raw_result() {
    let helper = KaopeiTestHelper::new("test_json_output_is_the_raw_result");
    helper.write_image("ootd.png", ImageFormat::Png, 0);

    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .match_body(Matcher::Regex(r#""mimeType":"image/png""#.to_string()))
        .with_status(200)
        .with_body(gemini_reply(NORMCORE_REVIEW))
        .create();

    helper
        .roast(&server.url(), "ootd.png", &["--json"])
        .success()
        .stdout(predicate::str::contains("\"scoreComment\": \"Solid 7.5"))
        .stdout(predicate::str::contains("\"style\": \"Normcore\""));

    helper.clean_work_dir();
}

#[test]
fn test_oversized_photo_is_rejected() {
    let helper = KaopeiTestHelper::new("test_oversized_photo_is_rejected");
    helper.write_blob("huge.jpg", 6 * 1024 * 1024);

    let mut server = mockito::Server::new();
    let mock = server.mock("POST", GENERATE_PATH).expect(0).create();

    helper
        .roast(&server.url(), "huge.jpg", &[])
        .failure()
        .code(2)
        .stdout(predicate::str::contains("max 5 MB"));

    mock.assert();
    helper.clean_work_dir();
}

#[test]
fn test_heic_photo_is_sent_as_heif() {
    let helper = KaopeiTestHelper::new("test_heic_photo_is_sent_as_heif");
    let mut heic = Vec::new();
    heic.extend_from_slice(&24u32.to_be_bytes());
    heic.extend_from_slice(b"ftypheic\0\0\0\0mif1heic");
    heic.extend_from_slice(&[0u8; 256]);
    std::fs::write(helper.work_dir.path().join("IMG_0001.HEIC"), heic).unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_body(Matcher::Regex(r#""mimeType":"image/heif""#.to_string()))
        .with_status(200)
        .with_body(gemini_reply(NORMCORE_REVIEW))
        .expect(1)
        .create();

    helper
        .roast(&server.url(), "IMG_0001.HEIC", &[])
        .success()
        .stdout(predicate::str::contains("IMG_0001.HEIC (image/heif, 280 bytes)"))
        .stdout(predicate::str::contains("SCORE     7.5 / 10"));

    mock.assert();
    helper.clean_work_dir();
}

#[test]
fn test_non_image_is_rejected() {
    let helper = KaopeiTestHelper::new("test_non_image_is_rejected");
    helper.write_file("notes.jpg", "this is a shopping list, not a photo");

    helper
        .roast("http://127.0.0.1:9", "notes.jpg", &[])
        .failure()
        .code(2)
        .stdout(predicate::str::contains("Unable to read notes.jpg as an image"));

    helper.clean_work_dir();
}

#[test]
fn test_missing_photo_is_reported() {
    let helper = KaopeiTestHelper::new("test_missing_photo_is_reported");

    helper
        .roast("http://127.0.0.1:9", "nowhere.jpg", &[])
        .failure()
        .code(2)
        .stdout(predicate::str::contains("Unable to find/open"));

    helper
        .run_command(&["roast", "--yes", "--api-key", "test-key"])
        .failure()
        .code(2)
        .stdout(predicate::str::contains("No photo given"));

    helper.clean_work_dir();
}

#[test]
fn test_missing_api_key_is_a_config_error() {
    let helper = KaopeiTestHelper::new("test_missing_api_key_is_a_config_error");
    helper.write_image("ootd.jpg", ImageFormat::Jpeg, 0);

    helper
        .run_command(&["roast", "--yes", "ootd.jpg"])
        .failure()
        .code(2)
        .stdout(predicate::str::contains("No API key provided"));

    helper.clean_work_dir();
}

#[test]
fn test_legacy_api_key_env_is_used() {
    let helper = KaopeiTestHelper::new("test_legacy_api_key_env_is_used");
    helper.write_image("ootd.jpg", ImageFormat::Jpeg, 0);

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_header("x-goog-api-key", "legacy-key")
        .with_status(200)
        .with_body(gemini_reply(NORMCORE_REVIEW))
        .expect(1)
        .create();

    helper
        .command()
        .env("API_KEY", "legacy-key")
        .args(["roast", "--yes", "--api-base-url", &server.url(), "ootd.jpg"])
        .assert()
        .success();

    mock.assert();
    helper.clean_work_dir();
}

#[test]
fn test_empty_reply_shows_generic_failure() {
    let helper = KaopeiTestHelper::new("test_empty_reply_shows_generic_failure");
    helper.write_image("ootd.jpg", ImageFormat::Jpeg, 0);

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body(gemini_reply(""))
        .expect(1)
        .create();

    helper
        .roast(&server.url(), "ootd.jpg", &[])
        .failure()
        .code(1)
        .stdout(predicate::str::contains(SERVICE_FAILURE_MESSAGE))
        .stdout(predicate::str::contains("7.5 / 10").not());

    mock.assert();
    helper.clean_work_dir();
}

#[test]
fn test_service_error_shows_generic_failure() {
    let helper = KaopeiTestHelper::new("test_service_error_shows_generic_failure");
    helper.write_image("ootd.jpg", ImageFormat::Jpeg, 0);

    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(503)
        .with_body(r#"{"error":{"code":503,"message":"The model is overloaded."}}"#)
        .create();

    helper
        .roast(&server.url(), "ootd.jpg", &[])
        .failure()
        .code(1)
        .stdout(predicate::str::contains(SERVICE_FAILURE_MESSAGE))
        .stdout(predicate::str::contains("More detailed logs at"));

    helper.clean_work_dir();
}

#[test]
fn test_persona_from_config_is_sent() {
    let helper = KaopeiTestHelper::new("test_persona_from_config_is_sent");
    helper.write_image("ootd.jpg", ImageFormat::Jpeg, 0);
    helper.write_file(
        ".kaopei/polite.yaml",
        "apiVersion: kaopei.dev/v1alpha
kind: KaopeiRoastPersona
metadata:
  name: polite
spec:
  systemInstruction: Be kind about the outfit.
  userPrompt: Please review this outfit.
",
    );

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_body(Matcher::PartialJson(serde_json::json!({
            "systemInstruction": { "parts": [{ "text": "Be kind about the outfit." }] }
        })))
        .with_status(200)
        .with_body(gemini_reply(NORMCORE_REVIEW))
        .expect(1)
        .create();

    helper
        .roast(&server.url(), "ootd.jpg", &[])
        .success()
        .stdout(predicate::str::contains("Using KaopeiRoastPersona/polite"));

    mock.assert();
    helper.clean_work_dir();
}
