use git_group_backup::{
    main_run, ActionConfig, Credentials, GiteaSettings, GitlabSettings, GroupBackupConfig,
    GroupBackupErrorKind,
};
use serde_json::json;
use wiremock::matchers::body_partial_json;
use wiremock::{MockServer, ResponseTemplate};

use crate::mocks::{
    current_user_mock, group_json, group_projects_mock, migrate_mock, organization_mock,
    project_json, search_groups_mock, GITEA_TOKEN, GITLAB_TOKEN,
};

fn mirror_config(gitlab: &MockServer, gitea: &MockServer) -> GroupBackupConfig {
    GroupBackupConfig {
        gitlab: GitlabSettings {
            credentials: Credentials {
                username: "backup-bot".to_string(),
                token: GITLAB_TOKEN.to_string(),
            },
            endpoint: gitlab.uri(),
            group: "eng".to_string(),
        },
        action: ActionConfig::Mirror(GiteaSettings {
            endpoint: gitea.uri(),
            token: GITEA_TOKEN.to_string(),
            org: "mirrors".to_string(),
        }),
        debug: false,
    }
}

#[tokio::test]
async fn every_project_is_mirrored_and_conflicts_are_skipped() {
    let gitlab = MockServer::start().await;
    let gitea = MockServer::start().await;

    search_groups_mock(
        "eng",
        ResponseTemplate::new(200).set_body_json(json!([group_json(12, "eng")])),
    )
    .expect(1)
    .mount(&gitlab)
    .await;
    group_projects_mock(
        12,
        ResponseTemplate::new(200).set_body_json(json!([
            project_json(10, "eng", "app", "https://git.example.com/eng/app.git"),
            project_json(11, "eng", "lib", "https://git.example.com/eng/lib.git"),
        ])),
    )
    .expect(1)
    .mount(&gitlab)
    .await;

    organization_mock(
        "mirrors",
        ResponseTemplate::new(200).set_body_json(json!({ "id": 7, "username": "mirrors" })),
    )
    .expect(1)
    .mount(&gitea)
    .await;
    current_user_mock(
        ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "login": "mirror-bot" })),
    )
    .expect(2)
    .mount(&gitea)
    .await;
    migrate_mock()
        .and(body_partial_json(json!({ "repo_name": "app" })))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "already exists" })),
        )
        .expect(1)
        .mount(&gitea)
        .await;
    migrate_mock()
        .and(body_partial_json(json!({
            "clone_addr": "https://git.example.com/eng/lib.git",
            "auth_username": "backup-bot",
            "auth_password": GITLAB_TOKEN,
            "uid": 7,
            "repo_owner": "mirrors",
            "repo_name": "lib",
            "description": "lib description",
            "mirror": true,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 99, "name": "lib" })))
        .expect(1)
        .mount(&gitea)
        .await;

    main_run(&mirror_config(&gitlab, &gitea)).await.unwrap();
}

#[tokio::test]
async fn missing_organization_stops_the_run_before_any_migration() {
    let gitlab = MockServer::start().await;
    let gitea = MockServer::start().await;

    search_groups_mock(
        "eng",
        ResponseTemplate::new(200).set_body_json(json!([group_json(12, "eng")])),
    )
    .expect(0)
    .mount(&gitlab)
    .await;
    organization_mock(
        "mirrors",
        ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })),
    )
    .expect(1)
    .mount(&gitea)
    .await;
    migrate_mock()
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&gitea)
        .await;

    let err = main_run(&mirror_config(&gitlab, &gitea)).await.unwrap_err();
    assert_eq!(err.kind(), &GroupBackupErrorKind::DestinationOrg);
}

#[tokio::test]
async fn rejected_destination_credentials_skip_every_migration() {
    let gitlab = MockServer::start().await;
    let gitea = MockServer::start().await;

    search_groups_mock(
        "eng",
        ResponseTemplate::new(200).set_body_json(json!([group_json(12, "eng")])),
    )
    .mount(&gitlab)
    .await;
    group_projects_mock(
        12,
        ResponseTemplate::new(200).set_body_json(json!([
            project_json(10, "eng", "app", "https://git.example.com/eng/app.git"),
            project_json(11, "eng", "lib", "https://git.example.com/eng/lib.git"),
        ])),
    )
    .mount(&gitlab)
    .await;
    organization_mock(
        "mirrors",
        ResponseTemplate::new(200).set_body_json(json!({ "id": 7, "username": "mirrors" })),
    )
    .mount(&gitea)
    .await;
    current_user_mock(ResponseTemplate::new(401))
        .expect(2)
        .mount(&gitea)
        .await;
    migrate_mock()
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&gitea)
        .await;

    main_run(&mirror_config(&gitlab, &gitea)).await.unwrap();
}
