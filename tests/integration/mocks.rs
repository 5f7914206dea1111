use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockBuilder, ResponseTemplate};

pub const GITLAB_TOKEN: &str = "glpat-secret";
pub const GITEA_TOKEN: &str = "gitea-secret";

pub fn group_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "path": name,
        "full_path": name,
        "web_url": format!("https://git.example.com/groups/{name}"),
    })
}

pub fn project_json(id: u64, group: &str, name: &str, url: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "http_url_to_repo": url,
        "ssh_url_to_repo": format!("git@git.example.com:{group}/{name}.git"),
        "namespace": { "id": 1, "name": group, "path": group, "kind": "group" },
    })
}

pub fn search_groups_mock(name: &str, response: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path("/api/v4/groups"))
        .and(query_param("search", name))
        .and(header("PRIVATE-TOKEN", GITLAB_TOKEN))
        .respond_with(response)
}

pub fn group_projects_mock(group_id: u64, response: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/api/v4/groups/{group_id}/projects")))
        .and(header("PRIVATE-TOKEN", GITLAB_TOKEN))
        .respond_with(response)
}

pub fn organization_mock(org: &str, response: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/orgs/{org}")))
        .and(header("Authorization", format!("token {GITEA_TOKEN}").as_str()))
        .respond_with(response)
}

pub fn current_user_mock(response: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .and(header("Authorization", format!("token {GITEA_TOKEN}").as_str()))
        .respond_with(response)
}

pub fn migrate_mock() -> MockBuilder {
    Mock::given(method("POST"))
        .and(path("/api/v1/repos/migrate"))
        .and(header("Authorization", format!("token {GITEA_TOKEN}").as_str()))
}
