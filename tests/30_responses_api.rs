mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
async fn get_requires_response_id() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/responses", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn create_requires_form_id() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/responses", server.base_url))
        .json(&json!({ "answers": [] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn unknown_response_is_not_found() -> Result<()> {
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!(
            "{}/api/responses?response_id=999999999",
            server.base_url
        ))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn unknown_form_rejects_response() -> Result<()> {
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/responses", server.base_url))
        .json(&json!({ "form_id": 999999999, "answers": [] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "form not found");

    Ok(())
}

#[tokio::test]
#[serial]
async fn unknown_question_rolls_back_response() -> Result<()> {
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let form_id = seeded_form_id(&client, &server.base_url).await?;

    let res = client
        .post(format!("{}/api/responses", server.base_url))
        .json(&json!({
            "form_id": form_id,
            "answers": [{ "question_id": 999999999, "answer_text": "?" }]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "question not found");

    Ok(())
}

#[tokio::test]
#[serial]
async fn submitted_response_round_trips() -> Result<()> {
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let form_id = seeded_form_id(&client, &server.base_url).await?;

    // A response with no answers is valid and reads back as an empty list
    let res = client
        .post(format!("{}/api/responses", server.base_url))
        .json(&json!({ "form_id": form_id, "answers": [] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let empty_response_id = body["data"]["response_id"].as_i64().expect("id");

    let res = client
        .get(format!(
            "{}/api/responses?response_id={}",
            server.base_url, empty_response_id
        ))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["form_id"].as_i64(), Some(form_id));
    assert_eq!(body["data"]["answers"].as_array().map(Vec::len), Some(0));

    // A response with one answer reads back with it
    let question_id = create_question(&client, &server.base_url).await?;
    let res = client
        .post(format!("{}/api/responses", server.base_url))
        .json(&json!({
            "form_id": form_id,
            "answers": [{
                "question_id": question_id,
                "answer_text": "hello",
                "selected_options": ["Red", "Blue"]
            }]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let response_id = body["data"]["response_id"].as_i64().expect("id");

    let res = client
        .get(format!(
            "{}/api/responses?response_id={}",
            server.base_url, response_id
        ))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let answers = body["data"]["answers"].as_array().expect("answers");
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["question_id"].as_i64(), Some(question_id));
    assert_eq!(answers[0]["answer_text"], "hello");
    assert_eq!(answers[0]["selected_options"], "Red,Blue");

    Ok(())
}

/// The seeded flash form's id, surfaced through the questions listing
/// (creating a question first so the listing is non-empty).
async fn seeded_form_id(client: &reqwest::Client, base_url: &str) -> Result<i64> {
    create_question(client, base_url).await?;

    let res = client
        .get(format!(
            "{}/api/questions?username=a@b.com&formLanguage=en&formType=flash",
            base_url
        ))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    Ok(body["data"]["form_id"].as_i64().expect("form_id"))
}

async fn create_question(client: &reqwest::Client, base_url: &str) -> Result<i64> {
    let res = client
        .post(format!("{}/api/questions", base_url))
        .json(&json!({
            "username": "a@b.com",
            "form_type": "flash",
            "form_language": "en",
            "question": { "question_type": "text", "question_text": "Any thoughts?" }
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    Ok(body["data"]["question_id"].as_i64().expect("question_id"))
}
