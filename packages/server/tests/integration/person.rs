use serde_json::json;

use crate::common::{TestApp, missing_id, routes};

mod person_creation {
    use super::*;

    #[tokio::test]
    async fn a_valid_person_can_be_added() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::PERSONS,
                &json!({ "name": "Dan Abramov", "number": "12-43234345" }),
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["name"], "Dan Abramov");
        assert_eq!(res.body["number"], "12-43234345");
        assert!(res.body["id"].is_string());
        assert_eq!(app.list(routes::PERSONS).await.len(), 1);
    }

    #[tokio::test]
    async fn short_name_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::PERSONS, &json!({ "name": "Al", "number": "123-45678" }))
            .await;

        assert_eq!(res.status, 400);
        assert!(
            res.body["error"]
                .as_str()
                .unwrap()
                .contains("Name must be at least 3 characters long")
        );
        assert!(app.list(routes::PERSONS).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_number_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::PERSONS, &json!({ "name": "Mary", "number": "1234-5678" }))
            .await;

        assert_eq!(res.status, 400);
        assert!(
            res.body["error"]
                .as_str()
                .unwrap()
                .contains("1234-5678 is not a valid phone number!")
        );
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::PERSONS, &json!({})).await;

        assert_eq!(res.status, 400);
        assert_eq!(
            res.body["error"],
            "Person validation failed: name: Name required, number: Phone number required"
        );
    }

    #[tokio::test]
    async fn names_are_unique() {
        let app = TestApp::spawn().await;
        app.seed_persons().await;

        let res = app
            .post(
                routes::PERSONS,
                &json!({ "name": "  Arto Hellas ", "number": "09-1234556" }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert!(res.body["error"].as_str().unwrap().contains("unique"));
        assert_eq!(app.list(routes::PERSONS).await.len(), 2);
    }
}

mod person_lookup {
    use super::*;

    #[tokio::test]
    async fn a_specific_person_can_be_viewed() {
        let app = TestApp::spawn().await;
        let ids = app.seed_persons().await;

        let res = app.get(&routes::person(&ids[1])).await;

        assert_eq!(res.status, 200);
        assert_eq!(
            res.body,
            json!({ "id": ids[1], "name": "Ada Lovelace", "number": "39-4453235" })
        );
    }

    #[tokio::test]
    async fn missing_person_is_404() {
        let app = TestApp::spawn().await;

        assert_eq!(app.get(&routes::person(&missing_id())).await.status, 404);
    }

    #[tokio::test]
    async fn malformed_id_is_400() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::person("abc")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "malformatted id");
    }
}

mod person_replacement {
    use super::*;

    #[tokio::test]
    async fn number_can_be_changed() {
        let app = TestApp::spawn().await;
        let ids = app.seed_persons().await;

        let res = app
            .put(
                &routes::person(&ids[0]),
                &json!({ "name": "Arto Hellas", "number": "040-7654321" }),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["number"], "040-7654321");
        assert_eq!(res.body["name"], "Arto Hellas");
    }

    #[tokio::test]
    async fn replacement_is_validated() {
        let app = TestApp::spawn().await;
        let ids = app.seed_persons().await;

        let res = app
            .put(
                &routes::person(&ids[0]),
                &json!({ "name": "Al", "number": "040-7654321" }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn cannot_take_another_persons_name() {
        let app = TestApp::spawn().await;
        let ids = app.seed_persons().await;

        let res = app
            .put(
                &routes::person(&ids[0]),
                &json!({ "name": "Ada Lovelace", "number": "040-7654321" }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert!(res.body["error"].as_str().unwrap().contains("unique"));
    }

    #[tokio::test]
    async fn replacing_a_missing_person_is_404() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::person(&missing_id()),
                &json!({ "name": "Nobody Here", "number": "040-7654321" }),
            )
            .await;

        assert_eq!(res.status, 404);
    }
}

mod person_deletion {
    use super::*;

    #[tokio::test]
    async fn a_person_can_be_deleted() {
        let app = TestApp::spawn().await;
        let ids = app.seed_persons().await;

        assert_eq!(app.delete(&routes::person(&ids[0])).await.status, 204);
        assert_eq!(app.get(&routes::person(&ids[0])).await.status, 404);
        assert_eq!(app.list(routes::PERSONS).await.len(), 1);
    }

    #[tokio::test]
    async fn deleted_names_can_be_reused() {
        let app = TestApp::spawn().await;
        let ids = app.seed_persons().await;

        app.delete(&routes::person(&ids[0])).await;
        let res = app
            .post(
                routes::PERSONS,
                &json!({ "name": "Arto Hellas", "number": "040-1234567" }),
            )
            .await;

        assert_eq!(res.status, 201);
    }

    #[tokio::test]
    async fn deleting_with_a_malformed_id_is_400() {
        let app = TestApp::spawn().await;

        assert_eq!(app.delete(&routes::person("abc")).await.status, 400);
    }
}

mod phonebook_info {
    use super::*;

    #[tokio::test]
    async fn info_reports_the_number_of_people() {
        let app = TestApp::spawn().await;
        app.seed_persons().await;

        let res = app.get(routes::INFO).await;

        assert_eq!(res.status, 200);
        assert!(
            res.content_type
                .as_deref()
                .is_some_and(|ct| ct.starts_with("text/html"))
        );
        assert!(res.text.starts_with("<p>Phonebook has info for 2 people</p><p>"));
    }
}
