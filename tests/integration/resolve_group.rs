use git_group_backup::{list_projects, resolve_group, GitlabPlatform, GroupBackupErrorKind};
use serde_json::json;
use wiremock::{MockServer, ResponseTemplate};

use crate::mocks::{
    group_json, group_projects_mock, project_json, search_groups_mock, GITLAB_TOKEN,
};

mod resolve {
    use super::*;

    #[tokio::test]
    async fn single_match() {
        let mock_server = MockServer::start().await;
        search_groups_mock(
            "eng",
            ResponseTemplate::new(200).set_body_json(json!([group_json(12, "eng")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

        let gitlab = GitlabPlatform::new(&mock_server.uri(), GITLAB_TOKEN.to_string());
        let group = resolve_group(&gitlab, "eng").await.unwrap();
        assert_eq!(group.id, 12);
        assert_eq!(group.name, "eng");
    }

    #[tokio::test]
    async fn two_matches_are_ambiguous() {
        let mock_server = MockServer::start().await;
        search_groups_mock(
            "eng",
            ResponseTemplate::new(200)
                .set_body_json(json!([group_json(12, "eng"), group_json(13, "eng")])),
        )
        .mount(&mock_server)
        .await;

        let gitlab = GitlabPlatform::new(&mock_server.uri(), GITLAB_TOKEN.to_string());
        let err = resolve_group(&gitlab, "eng").await.unwrap_err();
        assert_eq!(err.kind(), &GroupBackupErrorKind::AmbiguousGroup);
        assert!(err.to_string().contains("Could not get exact group match"));
    }

    #[tokio::test]
    async fn no_match_is_ambiguous() {
        let mock_server = MockServer::start().await;
        search_groups_mock("eng", ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let gitlab = GitlabPlatform::new(&mock_server.uri(), GITLAB_TOKEN.to_string());
        let err = resolve_group(&gitlab, "eng").await.unwrap_err();
        assert_eq!(err.kind(), &GroupBackupErrorKind::AmbiguousGroup);
    }

    #[tokio::test]
    async fn api_error_is_a_host_query_error() {
        let mock_server = MockServer::start().await;
        search_groups_mock("eng", ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let gitlab = GitlabPlatform::new(&mock_server.uri(), GITLAB_TOKEN.to_string());
        let err = resolve_group(&gitlab, "eng").await.unwrap_err();
        assert_eq!(err.kind(), &GroupBackupErrorKind::HostQuery);
        assert!(err.to_string().contains("boom"));
    }
}

mod list {
    use super::*;

    #[tokio::test]
    async fn failing_group_contributes_nothing() {
        let mock_server = MockServer::start().await;
        group_projects_mock(
            1,
            ResponseTemplate::new(200).set_body_json(json!([
                project_json(10, "eng", "app", "https://git.example.com/eng/app.git"),
                project_json(11, "eng", "lib", "https://git.example.com/eng/lib.git"),
            ])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
        group_projects_mock(2, ResponseTemplate::new(403))
            .expect(1)
            .mount(&mock_server)
            .await;
        group_projects_mock(
            3,
            ResponseTemplate::new(200).set_body_json(json!([project_json(
                10,
                "eng",
                "app",
                "https://git.example.com/eng/app.git"
            )])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

        let gitlab = GitlabPlatform::new(&mock_server.uri(), GITLAB_TOKEN.to_string());
        let groups: Vec<_> = [1, 2, 3]
            .into_iter()
            .map(|id| git_group_backup::Group {
                id,
                name: format!("group-{id}"),
                full_path: format!("group-{id}"),
            })
            .collect();
        let projects = list_projects(&gitlab, &groups).await;
        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["app", "lib", "app"]);
        assert_eq!(projects[0].description, "app description");
        assert_eq!(projects[1].http_url, "https://git.example.com/eng/lib.git");
    }
}
