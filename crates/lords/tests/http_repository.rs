mod common;

use lords::benchmark::{BenchmarkRepository, HttpBenchmarkRepository};
use lords::catalog::{
    HttpModelRepository, ListFilters, ModelDraft, ModelRepository, ModelService, SearchFilters,
};
use lords::discussion::{CommentRepository, HttpCommentRepository, NewComment, thread_comments};
use lords::ranking::{SortDirection, SortKey, rank};
use lords::session::SessionStore;
use lords::{AiModel, ApiError, ModelId, VoteValue};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_list_normalises_paged_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/models")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("limit".into(), "2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": [
                    {"model_id": 1, "name": "GPT-4", "score": "9.10", "likes": "12",
                     "category": {"category_id": 1, "category_name": "texto"}},
                    {"id": "2", "name": "Whisper", "category": "audio", "dislikes": null}
                ],
                "pagination": {"total": 2, "page": 1, "limit": 2, "totalPages": 1}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let (session, _) = common::anonymous().await;
    let repo = HttpModelRepository::new(common::transport(&server, session));
    let page = repo.list(&ListFilters::page(1, 2)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.models.len(), 2);
    assert_eq!(page.models[0].score, Some(9.1));
    assert_eq!(page.models[0].likes, 12);
    assert_eq!(page.models[1].model_id, ModelId::new(2));
    assert_eq!(page.models[1].category_name(), Some("audio"));
    assert_eq!(page.models[1].dislikes, 0);
    assert!(page.is_last());
}

#[tokio::test]
async fn test_bare_and_wrapped_lists_decode_alike() {
    let mut server = Server::new_async().await;
    let models = json!([{"model_id": 7, "name": "Llama 3"}]);
    server
        .mock("GET", "/models")
        .match_query(Matcher::UrlEncoded("category".into(), "texto".into()))
        .with_status(200)
        .with_body(models.to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/models/search")
        .match_query(Matcher::UrlEncoded("query".into(), "llama".into()))
        .with_status(200)
        .with_body(json!({ "data": models }).to_string())
        .create_async()
        .await;

    let (session, _) = common::anonymous().await;
    let repo = HttpModelRepository::new(common::transport(&server, session));
    let listed = repo
        .list(&ListFilters::default().with_category("texto"))
        .await
        .unwrap();
    let searched = repo.search(&SearchFilters::text("llama")).await.unwrap();

    assert_eq!(listed.models, searched.models);
    assert_eq!(listed.models[0].name, "Llama 3");
}

#[tokio::test]
async fn test_nan_scores_from_server_rank_without_panicking() {
    let mut server = Server::new_async().await;
    let models: Vec<serde_json::Value> = (0..64)
        .map(|i| {
            let score = if i % 3 == 0 { json!("NaN") } else { json!(i) };
            json!({"model_id": i + 1, "name": format!("m{i}"), "score": score})
        })
        .collect();
    server
        .mock("GET", "/models")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "data": models }).to_string())
        .create_async()
        .await;

    let (session, _) = common::anonymous().await;
    let repo = HttpModelRepository::new(common::transport(&server, session));
    let page = repo.list(&ListFilters::page(1, 64)).await.unwrap();
    assert_eq!(page.models[0].score, None);

    let ranked = rank(&page.models, SortKey::Score, SortDirection::Desc);
    assert_eq!(ranked.len(), 64);
    assert_eq!(ranked[0].model.name, "m62");
    assert!(ranked.last().unwrap().model.score.is_none());
}

#[tokio::test]
async fn test_search_sends_filters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/models/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("developer".into(), "Meta".into()),
            Matcher::UrlEncoded("min_score".into(), "8".into()),
            Matcher::UrlEncoded("sort_by".into(), "release_date".into()),
            Matcher::UrlEncoded("sort_order".into(), "desc".into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let (session, _) = common::anonymous().await;
    let repo = HttpModelRepository::new(common::transport(&server, session));
    let filters = SearchFilters {
        developer: Some("Meta".to_string()),
        min_score: Some(8.0),
        sort_by: Some(SortKey::ReleaseDate),
        sort_order: Some(SortDirection::Desc),
        ..Default::default()
    };
    let page = repo.search(&filters).await.unwrap();

    mock.assert_async().await;
    assert!(page.models.is_empty());
}

#[tokio::test]
async fn test_not_found_carries_server_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/models/99")
        .with_status(404)
        .with_body(json!({"message": "Modelo no encontrado"}).to_string())
        .create_async()
        .await;

    let (session, _) = common::anonymous().await;
    let repo = HttpModelRepository::new(common::transport(&server, session));
    let err = repo.get_by_id(ModelId::new(99)).await.unwrap_err();

    assert_eq!(err, ApiError::NotFound("Modelo no encontrado".to_string()));
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_bearer_token_attached() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/models")
        .match_header("authorization", "Bearer secret-token")
        .match_body(Matcher::Json(json!({"name": "Mistral", "developer": "Mistral AI"})))
        .with_status(201)
        .with_body(json!({"data": {"model_id": 11, "name": "Mistral", "developer": "Mistral AI"}}).to_string())
        .create_async()
        .await;

    let (session, _) = common::signed_in("secret-token").await;
    let repo = HttpModelRepository::new(common::transport(&server, session));
    let created = repo
        .create(&ModelDraft {
            name: Some("Mistral".to_string()),
            developer: Some("Mistral AI".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(created.model_id, ModelId::new(11));
}

#[tokio::test]
async fn test_unauthorized_tears_down_session() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/models/3")
        .with_status(401)
        .with_body(json!({"error": "Token expirado"}).to_string())
        .create_async()
        .await;

    let (session, store) = common::signed_in("stale").await;
    let repo = HttpModelRepository::new(common::transport(&server, session.clone()));
    let err = repo.delete(ModelId::new(3)).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Unauthorized: Token expirado");
    assert!(!session.is_authenticated());
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_vote_rolled_back_when_server_fails() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/models/5/vote")
        .match_body(Matcher::Json(json!({"value": 1})))
        .with_status(500)
        .with_body(json!({"message": "database unavailable"}).to_string())
        .create_async()
        .await;

    let (session, _) = common::signed_in("tok").await;
    let repo = Arc::new(HttpModelRepository::new(common::transport(&server, session)));
    let service = ModelService::new(repo);

    let mut model = AiModel::new(5, "Gemini");
    model.likes = 5;
    model.dislikes = 2;
    let err = service.vote(&mut model, VoteValue::Up).await.unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.status(), Some(500));
    assert_eq!((model.likes, model.dislikes), (5, 2));
    assert_eq!(model.total_votes, 0);
}

#[tokio::test]
async fn test_vote_kept_when_server_accepts() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/models/5/vote")
        .match_body(Matcher::Json(json!({"value": -1})))
        .with_status(200)
        .with_body(json!({"message": "Voto registrado"}).to_string())
        .create_async()
        .await;

    let (session, _) = common::signed_in("tok").await;
    let repo = Arc::new(HttpModelRepository::new(common::transport(&server, session)));
    let service = ModelService::new(repo);

    let mut model = AiModel::new(5, "Gemini");
    model.likes = 5;
    model.dislikes = 2;
    service.vote(&mut model, VoteValue::Down).await.unwrap();
    assert_eq!((model.likes, model.dislikes, model.vote_score), (5, 3, -1));
}

#[tokio::test]
async fn test_list_all_follows_pages() {
    let mut server = Server::new_async().await;
    let page_one = server
        .mock("GET", "/models")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("limit".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(json!([{"model_id": 1, "name": "A"}, {"model_id": 2, "name": "B"}]).to_string())
        .create_async()
        .await;
    let page_two = server
        .mock("GET", "/models")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(json!([{"model_id": 3, "name": "C"}]).to_string())
        .create_async()
        .await;

    let (session, _) = common::anonymous().await;
    let repo = Arc::new(HttpModelRepository::new(common::transport(&server, session)));
    let service = ModelService::new(repo).with_page_size(2);
    let all = service.list_all(None).await.unwrap();

    page_one.assert_async().await;
    page_two.assert_async().await;
    let names: Vec<_> = all.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_compare_reports_failed_metric_fetch() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/models/1/metrics")
        .with_status(200)
        .with_body(
            json!({"data": [
                {"characteristic_id": 1, "characteristic_name": "precision", "value": "91.5"},
                {"characteristic_id": 2, "characteristic_name": "tiempo_inferencia", "value": 40}
            ]})
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/models/2/metrics")
        .with_status(503)
        .with_body("Service Unavailable")
        .create_async()
        .await;
    server
        .mock("GET", "/models/3/metrics")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let (session, _) = common::anonymous().await;
    let repo = Arc::new(HttpModelRepository::new(common::transport(&server, session)));
    let service = ModelService::new(repo);
    let models = vec![
        AiModel::new(1, "GPT-4"),
        AiModel::new(2, "Claude"),
        AiModel::new(3, "Llama 3"),
    ];
    let comparison = service.compare(&models).await;

    assert_eq!(comparison.series, vec!["GPT-4", "Llama 3"]);
    assert_eq!(comparison.failures.len(), 1);
    assert_eq!(comparison.failures[0].model_id, ModelId::new(2));

    let labels: Vec<_> = comparison.axes.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, vec!["Precision", "Tiempo Inferencia"]);
    let precision = comparison.row("precision").unwrap();
    assert_eq!(precision.value("GPT-4"), Some(91.5));
    assert_eq!(precision.value("Llama 3"), Some(0.0));
}

#[tokio::test]
async fn test_model_details_join_metrics() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/models/4")
        .with_status(200)
        .with_body(
            json!({"model_id": 4, "name": "Whisper", "versions": [
                {"version_id": 1, "version_number": "1.0", "release_date": "2022-09-21",
                 "is_major_update": true}
            ]})
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/models/4/metrics")
        .with_status(200)
        .with_body(json!([{"id": 9, "name": "robustez", "value": 70}]).to_string())
        .create_async()
        .await;

    let (session, _) = common::anonymous().await;
    let repo = Arc::new(HttpModelRepository::new(common::transport(&server, session)));
    let details = ModelService::new(repo)
        .get_model_details(ModelId::new(4))
        .await
        .unwrap();

    assert_eq!(details.versions.len(), 1);
    assert_eq!(details.characteristics[0].characteristic_name, "robustez");
    assert_eq!(details.characteristics[0].model_id, ModelId::new(4));
}

#[tokio::test]
async fn test_comments_thread_from_nested_authors() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/models/1/comments")
        .with_status(200)
        .with_body(
            json!({"data": [
                {"comment_id": 1, "content": "Impresionante", "user": {"user_id": 3, "username": "tyrion"}},
                {"comment_id": 2, "content": "De acuerdo", "parent_id": 1, "user_id": 4, "username": "sansa"}
            ]})
            .to_string(),
        )
        .create_async()
        .await;
    let post = server
        .mock("POST", "/models/1/comments")
        .match_body(Matcher::Json(json!({"content": "Gracias", "parent_id": 2})))
        .with_status(201)
        .with_body(json!({"data": {"comment_id": 3, "content": "Gracias", "parent_id": 2}}).to_string())
        .create_async()
        .await;

    let (session, _) = common::signed_in("tok").await;
    let repo = HttpCommentRepository::new(common::transport(&server, session));
    let comments = repo.list(ModelId::new(1)).await.unwrap();
    assert_eq!(comments[0].author.as_ref().unwrap().username, "tyrion");
    assert_eq!(comments[1].author.as_ref().unwrap().user_id, 4);

    let reply = repo
        .add(ModelId::new(1), &NewComment::reply(2, "Gracias"))
        .await
        .unwrap();
    post.assert_async().await;

    let mut all = comments.clone();
    all.push(reply);
    let threads = thread_comments(&all);
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].replies.len(), 2);
}

#[tokio::test]
async fn test_benchmarks_list_and_history() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/models/1/benchmarks")
        .with_status(200)
        .with_body(
            json!({"data": [
                {"benchmark_id": 1, "benchmark_name": "MMLU", "score": "86.4", "test_date": "2024-01-10"}
            ]})
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/models/1/benchmarks/1/history")
        .with_status(200)
        .with_body(
            json!({"data": [
                {"benchmark_id": 1, "benchmark_name": "MMLU", "score": 80, "test_date": "2023-06-01"},
                {"benchmark_id": 1, "benchmark_name": "MMLU", "score": 86.4, "test_date": "2024-01-10"}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let (session, _) = common::anonymous().await;
    let repo = HttpBenchmarkRepository::new(common::transport(&server, session));
    let results = repo.list(ModelId::new(1)).await.unwrap();
    assert_eq!(results[0].score, 86.4);

    let history = repo.history(ModelId::new(1), 1).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].score, 80.0);
}
