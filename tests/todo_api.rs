
use axum::http::{Method, StatusCode};
use serde_json::{Value, json};
use test_util::{send, test_router};

async fn create(router: &axum::Router, subject: &str, description: &str) -> Value {
    let response = send(
        router,
        Method::POST,
        "/todos",
        Some(json!({"subject": subject, "description": description})),
    )
    .await;
    assert_eq!(StatusCode::OK, response.status);

    response.json()["todo"].clone()
}

fn ids_in(listing: &Value) -> Vec<i64> {
    listing["todos"]
        .as_array()
        .expect("todos should be an array")
        .iter()
        .map(|todo| todo["id"].as_i64().expect("id should be an integer"))
        .collect()
}

mod create_todo {
    use super::*;

    #[tokio::test]
    async fn returns_created_item() {
        let router = test_router().await;

        let response = send(
            &router,
            Method::POST,
            "/todos",
            Some(json!({"subject": "a", "description": "b"})),
        )
        .await;
        assert_eq!(StatusCode::OK, response.status);
        assert_eq!(Some("application/json"), response.content_type());

        let todo = &response.json()["todo"];
        assert_eq!(1, todo["id"]);
        assert_eq!("a", todo["subject"]);
        assert_eq!("b", todo["description"]);
        assert_eq!(todo["created_at"], todo["updated_at"]);
    }

    #[tokio::test]
    async fn empty_subject_is_rejected_with_empty_body() {
        let router = test_router().await;

        let response = send(&router, Method::POST, "/todos", Some(json!({"subject": ""}))).await;
        assert_eq!(StatusCode::BAD_REQUEST, response.status);
        assert_eq!(Some("application/json"), response.content_type());
        assert!(response.body.is_empty());

        let listing = send(&router, Method::GET, "/todos", None).await;
        assert!(ids_in(&listing.json()).is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let router = test_router().await;

        let response = send(&router, Method::POST, "/todos", Some(json!(["not", "an", "object"])))
            .await;
        assert_eq!(StatusCode::BAD_REQUEST, response.status);
        assert_eq!("invalid_json", response.json()["error_code"]);
    }
}

mod read_todos {
    use super::*;

    #[tokio::test]
    async fn pages_newest_first() {
        let router = test_router().await;
        for subject in ["first", "second", "third"] {
            create(&router, subject, "").await;
        }

        let first_page = send(&router, Method::GET, "/todos?prev_id=0&size=2", None).await;
        assert_eq!(StatusCode::OK, first_page.status);
        let first_page = first_page.json();
        assert_eq!(vec![3, 2], ids_in(&first_page));
        assert_eq!("third", first_page["todos"][0]["subject"]);

        let second_page = send(&router, Method::GET, "/todos?prev_id=2&size=2", None).await;
        assert_eq!(vec![1], ids_in(&second_page.json()));
    }

    #[tokio::test]
    async fn malformed_params_fall_back_to_defaults() {
        let router = test_router().await;
        for index in 0..7 {
            create(&router, &format!("item {index}"), "").await;
        }

        let response = send(&router, Method::GET, "/todos?prev_id=oops&size=many", None).await;
        assert_eq!(StatusCode::OK, response.status);
        assert_eq!(vec![7, 6, 5, 4, 3], ids_in(&response.json()));
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let router = test_router().await;

        let response = send(&router, Method::GET, "/todos", None).await;
        assert_eq!(StatusCode::OK, response.status);
        assert_eq!(json!({"todos": []}), response.json());
    }
}

mod update_todo {
    use super::*;

    #[tokio::test]
    async fn replaces_content() {
        let router = test_router().await;
        let created = create(&router, "old", "stale").await;

        let response = send(
            &router,
            Method::PUT,
            "/todos",
            Some(json!({"id": created["id"], "subject": "new", "description": "fresh"})),
        )
        .await;
        assert_eq!(StatusCode::OK, response.status);

        let todo = &response.json()["todo"];
        assert_eq!(created["id"], todo["id"]);
        assert_eq!("new", todo["subject"]);
        assert_eq!("fresh", todo["description"]);
        assert_eq!(created["created_at"], todo["created_at"]);
    }

    #[tokio::test]
    async fn missing_item_is_not_found() {
        let router = test_router().await;

        let response = send(
            &router,
            Method::PUT,
            "/todos",
            Some(json!({"id": 999, "subject": "x", "description": "y"})),
        )
        .await;
        assert_eq!(StatusCode::NOT_FOUND, response.status);
        let body = response.json();
        assert_eq!("not_found", body["error_code"]);
        assert!(body.get("todo").is_none());
    }

    #[tokio::test]
    async fn missing_id_is_rejected() {
        let router = test_router().await;
        create(&router, "a", "").await;

        let response = send(
            &router,
            Method::PUT,
            "/todos",
            Some(json!({"subject": "x", "description": "y"})),
        )
        .await;
        assert_eq!(StatusCode::BAD_REQUEST, response.status);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn empty_subject_is_rejected() {
        let router = test_router().await;
        create(&router, "a", "").await;

        let response = send(
            &router,
            Method::PUT,
            "/todos",
            Some(json!({"id": 1, "subject": "", "description": "y"})),
        )
        .await;
        assert_eq!(StatusCode::BAD_REQUEST, response.status);
        assert!(response.body.is_empty());
    }
}

mod delete_todos {
    use super::*;

    #[tokio::test]
    async fn removes_listed_items() {
        let router = test_router().await;
        for subject in ["a", "b", "c"] {
            create(&router, subject, "").await;
        }

        let response = send(&router, Method::DELETE, "/todos", Some(json!({"ids": [1, 3]}))).await;
        assert_eq!(StatusCode::OK, response.status);
        assert_eq!(json!({}), response.json());

        let listing = send(&router, Method::GET, "/todos", None).await;
        assert_eq!(vec![2], ids_in(&listing.json()));
    }

    #[tokio::test]
    async fn empty_list_is_a_no_op() {
        let router = test_router().await;
        create(&router, "a", "").await;

        let response = send(&router, Method::DELETE, "/todos", Some(json!({"ids": []}))).await;
        assert_eq!(StatusCode::OK, response.status);

        let listing = send(&router, Method::GET, "/todos", None).await;
        assert_eq!(vec![1], ids_in(&listing.json()));
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let router = test_router().await;
        create(&router, "a", "").await;

        let response = send(&router, Method::DELETE, "/todos", Some(json!({"ids": [40, 41]}))).await;
        assert_eq!(StatusCode::NOT_FOUND, response.status);
    }
}

#[tokio::test]
async fn healthz_reports_ok() {
    let router = test_router().await;

    let response = send(&router, Method::GET, "/healthz", None).await;
    assert_eq!(StatusCode::OK, response.status);
    assert_eq!(json!({"message": "OK"}), response.json());
}

#[tokio::test]
async fn unsupported_method_is_rejected() {
    let router = test_router().await;

    let response = send(&router, Method::PATCH, "/todos", Some(json!({}))).await;
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED, response.status);
}
