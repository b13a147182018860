use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::{self, AppState};
use server::startup::build_cors;

async fn build_app() -> anyhow::Result<Router> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    let cors = build_cors(&configs::CorsConfig::default())?;
    Ok(routes::build_router(AppState::new(db), cors))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body)?).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

fn recipe(title: &str, ingredients: &str, cuisine: &str, diet: &str) -> Value {
    json!({
        "title": title,
        "ingredients": ingredients,
        "instructions": "Cook until done.",
        "cuisine": cuisine,
        "dietary_preferences": diet
    })
}

#[tokio::test]
async fn health_and_openapi() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/recipes/{id}/rate"].is_object());
    Ok(())
}

#[tokio::test]
async fn create_get_update_delete() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, created) = send(&app, "POST", "/recipes/", Some(recipe("Ramen", "noodles, broth", "Japanese", "none"))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["average_rating"], 0.0);
    let id = created["id"].as_i64().unwrap();

    let (status, got) = send(&app, "GET", &format!("/recipes/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(got["title"], "Ramen");
    assert_eq!(got["ratings"], json!([]));
    assert_eq!(got["comments"], json!([]));

    let mut body = recipe("Shoyu ramen", "noodles, soy broth", "Japanese", "none");
    body["average_rating"] = json!(5.0);
    body["id"] = json!(12345);
    let (status, updated) = send(&app, "PUT", &format!("/recipes/{id}"), Some(body)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["title"], "Shoyu ramen");
    assert_eq!(updated["average_rating"], 0.0);

    let (status, msg) = send(&app, "DELETE", &format!("/recipes/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(msg["message"], "Recipe deleted successfully");

    let (status, err) = send(&app, "GET", &format!("/recipes/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["message"], "Recipe not found");
    Ok(())
}

#[tokio::test]
async fn validation_errors_are_400() -> anyhow::Result<()> {
    let app = build_app().await?;
    let long_title = "t".repeat(101);
    let (status, err) = send(&app, "POST", "/recipes/", Some(recipe(&long_title, "x", "y", "z"))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Validation Error");

    let (status, _) = send(&app, "GET", "/recipes/?skip=-1", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "GET", "/recipes/?limit=0", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, created) = send(&app, "POST", "/recipes/", Some(recipe("Tacos", "tortilla", "Mexican", "none"))).await?;
    let id = created["id"].as_i64().unwrap();
    for bad in [5.5, -1.0] {
        let (status, _) = send(&app, "POST", &format!("/recipes/{id}/rate"), Some(json!({"rating": bad}))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
    let (_, got) = send(&app, "GET", &format!("/recipes/{id}"), None).await?;
    assert_eq!(got["ratings"], json!([]));
    assert_eq!(got["average_rating"], 0.0);
    Ok(())
}

#[tokio::test]
async fn rating_comment_and_cascade() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, created) = send(&app, "POST", "/recipes/", Some(recipe("Pho", "rice noodles, beef", "Vietnamese", "dairy-free"))).await?;
    let id = created["id"].as_i64().unwrap();

    send(&app, "POST", &format!("/recipes/{id}/rate"), Some(json!({"rating": 5}))).await?;
    let (status, rated) = send(&app, "POST", &format!("/recipes/{id}/rate"), Some(json!({"rating": 2.0}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert!((rated["average_rating"].as_f64().unwrap() - 3.5).abs() < 1e-9);
    assert_eq!(rated["ratings"].as_array().unwrap().len(), 2);

    for c in ["fragrant", "more lime", "perfect"] {
        let (status, _) = send(&app, "POST", &format!("/recipes/{id}/comment"), Some(json!({"content": c}))).await?;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, comments) = send(&app, "GET", &format!("/recipes/{id}/comments"), None).await?;
    let contents: Vec<&str> = comments.as_array().unwrap().iter().filter_map(|c| c["content"].as_str()).collect();
    assert_eq!(contents, ["fragrant", "more lime", "perfect"]);

    let (status, _) = send(&app, "DELETE", &format!("/recipes/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, comments) = send(&app, "GET", &format!("/recipes/{id}/comments"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments, json!([]));
    Ok(())
}

#[tokio::test]
async fn unknown_recipe() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, _) = send(&app, "GET", "/recipes/999999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "POST", "/recipes/999999/rate", Some(json!({"rating": 3}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "POST", "/recipes/999999/comment", Some(json!({"content": "hi"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/recipes/999999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = send(&app, "GET", "/recipes/999999/comments", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn search_and_list() -> anyhow::Result<()> {
    let app = build_app().await?;
    send(&app, "POST", "/recipes/", Some(recipe("Butter chicken", "chicken, butter", "Indian", "gluten-free"))).await?;
    send(&app, "POST", "/recipes/", Some(recipe("Kung pao", "chicken, peanuts", "Chinese", "dairy-free"))).await?;
    send(&app, "POST", "/recipes/", Some(recipe("Chana masala", "chickpeas", "Indian", "vegan"))).await?;

    let (_, rows) = send(&app, "GET", "/recipes/search/?keyword=chicken", None).await?;
    assert_eq!(rows.as_array().unwrap().len(), 2);

    let (_, rows) = send(&app, "GET", "/recipes/search/?keyword=chicken&cuisine=Indian", None).await?;
    let titles: Vec<&str> = rows.as_array().unwrap().iter().filter_map(|r| r["title"].as_str()).collect();
    assert_eq!(titles, ["Butter chicken"]);

    let (_, rows) = send(&app, "GET", "/recipes/search/?dietary_preference=vegan", None).await?;
    assert_eq!(rows.as_array().unwrap().len(), 1);

    let (_, all) = send(&app, "GET", "/recipes/search/", None).await?;
    let (_, listed) = send(&app, "GET", "/recipes/?limit=1000", None).await?;
    assert_eq!(all.as_array().unwrap().len(), listed.as_array().unwrap().len());

    let (_, page) = send(&app, "GET", "/recipes/?skip=1&limit=1", None).await?;
    assert_eq!(page[0]["title"], "Kung pao");
    Ok(())
}

#[tokio::test]
async fn share_reads_query_or_body() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "POST", "/recipes/7/share?share_method=email", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Recipe shared via email");

    let (status, body) = send(&app, "POST", "/recipes/7/share", Some(json!({"share_method": "twitter"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Recipe shared via twitter");

    let (status, _) = send(&app, "POST", "/recipes/7/share", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
