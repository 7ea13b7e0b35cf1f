//
//  teamcity-cli
//  tests/http.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end requests through the `reqwest` transport against a local
//! mock server.

use std::net::TcpListener;
use std::sync::Arc;
use std::time::{Duration, Instant};

use mockito::{Matcher, Server};

use teamcity_cli::api::transport::ReqwestTransport;
use teamcity_cli::api::{ApiError, TeamCityClient};
use teamcity_cli::fields::{ProjectField, ProjectsField};
use teamcity_cli::locators::BuildLocator;

fn client_for(server: &Server) -> TeamCityClient {
    TeamCityClient::new(&server.url(), false).unwrap()
}

#[test]
fn basic_auth_header_is_sent() {
    let mut server = Server::new();
    // admin:secret
    let mock = server
        .mock("GET", "/app/rest/server")
        .match_header("authorization", "Basic YWRtaW46c2VjcmV0")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"version":"2024.12 (build 174331)","buildNumber":"174331"}"#)
        .create();

    let mut client = client_for(&server);
    client.connect("admin", "secret");
    let info = client.server().info().unwrap();

    assert_eq!(info.build_number.as_deref(), Some("174331"));
    mock.assert();
}

#[test]
fn bearer_token_and_api_version() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/app/rest/2018.1/projects")
        .match_header("authorization", "Bearer tok-123")
        .match_query(Matcher::UrlEncoded(
            "fields".into(),
            "count,project(id,name)".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"count":1,"project":[{"id":"_Root","name":"<Root project>"}]}"#)
        .create();

    let mut client = client_for(&server);
    client.connect_with_access_token("tok-123");
    client.use_version("2018.1");

    let projects = client
        .projects()
        .with_fields(
            ProjectsField::with_fields()
                .count()
                .project(ProjectField::with_fields().id().name()),
        )
        .all()
        .unwrap();

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, "_Root");
    mock.assert();
}

#[test]
fn guest_requests_use_guest_path() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/guestAuth/app/rest/builds")
        .match_query(Matcher::UrlEncoded("locator".into(), "running:true".into()))
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(r#"<builds count="1"><build id="5" state="running" buildTypeId="Bt1"/></builds>"#)
        .create();

    let mut client = client_for(&server);
    client.connect_as_guest();
    let running = client
        .builds()
        .by_locator(&BuildLocator::running_builds())
        .unwrap();

    assert_eq!(running.len(), 1);
    assert_eq!(running[0].state.as_deref(), Some("running"));
    mock.assert();
}

#[test]
fn not_found_body_is_not_decoded() {
    let mut server = Server::new();
    server
        .mock("GET", "/app/rest/builds/id:999")
        .with_status(404)
        .with_header("content-type", "text/plain")
        .with_body("NotFoundException: No build found by locator 'id:999'.")
        .create();

    let mut client = client_for(&server);
    client.connect("admin", "secret");
    let err = client.builds().by_id("999").unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn cache_serves_repeated_reads() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/app/rest/server")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"version":"2024.12"}"#)
        .expect(1)
        .create();

    let mut client = client_for(&server);
    client.connect("admin", "secret");
    client.enable_cache();
    client.server().info().unwrap();
    client.server().info().unwrap();

    mock.assert();
}

#[test]
fn text_put_then_flag_read() {
    let mut server = Server::new();
    let put = server
        .mock("PUT", "/app/rest/buildTypes/id:Bt1/paused")
        .match_header("content-type", "text/plain")
        .match_body("true")
        .with_status(200)
        .with_body("true")
        .create();
    let get = server
        .mock("GET", "/app/rest/buildTypes/id:Bt1/paused")
        .match_header("accept", "text/plain")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("true")
        .create();

    let mut client = client_for(&server);
    client.connect("admin", "secret");
    let locator = teamcity_cli::locators::BuildTypeLocator::with_id("Bt1");
    client.build_configs().set_pause_status(&locator, true).unwrap();
    assert!(client.build_configs().pause_status(&locator).unwrap());

    put.assert();
    get.assert();
}

#[test]
fn unreachable_server_is_connectivity_error() {
    // Nothing listens on port 9 (discard) in the test environment.
    let mut client = TeamCityClient::new("http://127.0.0.1:9", false).unwrap();
    client.connect("admin", "secret");

    let err = client.server().info().unwrap_err();
    assert!(matches!(err, ApiError::Connectivity { .. }));
}

#[test]
fn silent_server_times_out_through_the_transport() {
    // Accepts connections into the backlog but never answers.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let host = format!("http://{}", listener.local_addr().unwrap());

    let transport = ReqwestTransport::new(Some(Duration::from_millis(300))).unwrap();
    let mut client = TeamCityClient::with_transport(&host, false, Arc::new(transport)).unwrap();
    client.connect("admin", "secret");

    let started = Instant::now();
    let err = client.server().info().unwrap_err();

    assert!(matches!(err, ApiError::Connectivity { .. }));
    assert!(started.elapsed() < Duration::from_secs(10));
    drop(listener);
}
