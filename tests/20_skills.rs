mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn mutations_require_a_token() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/skills/add", server.base_url))
        .json(&json!({ "name": "Go" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);

    Ok(())
}

#[tokio::test]
async fn skill_crud_lifecycle() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let base = &server.base_url;
    let token = common::admin_token(&client, base).await?;

    let name = common::unique("Go");

    // create
    let res = client
        .post(format!("{base}/api/skills/add"))
        .bearer_auth(&token)
        .json(&json!({ "name": name, "level": "  Intermediate " }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["skill"]["name"], name);
    assert_eq!(body["skill"]["level"], "Intermediate");
    let id = body["skill"]["id"].as_str().unwrap().to_string();

    // duplicate name conflicts
    let res = client
        .post(format!("{base}/api/skills/add"))
        .bearer_auth(&token)
        .json(&json!({ "name": name }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // update only the level; the name must survive
    let res = client
        .put(format!("{base}/api/skills/{id}"))
        .bearer_auth(&token)
        .json(&json!({ "level": "Expert" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["skill"]["name"], name);
    assert_eq!(body["skill"]["level"], "Expert");

    // an update carrying no recognized fields returns the current document
    let res = client
        .put(format!("{base}/api/skills/{id}"))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["skill"]["level"], "Expert");

    // the list is public and contains the new skill
    let res = client.get(format!("{base}/api/skills/list")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);
    let skills = body["skills"].as_array().unwrap();
    assert_eq!(body["count"], skills.len());
    assert!(skills.iter().any(|s| s["name"] == name.as_str()));

    // delete, then the id is gone
    let res = client
        .delete(format!("{base}/api/skills/{id}"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(format!("{base}/api/skills/{id}"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn malformed_skill_ids_are_rejected() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let base = &server.base_url;
    let token = common::admin_token(&client, base).await?;

    let res = client
        .put(format!("{base}/api/skills/not-an-id"))
        .bearer_auth(&token)
        .json(&json!({ "level": "Expert" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Invalid Skill ID format");

    let res = client
        .delete(format!("{base}/api/skills/not-an-id"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
