//
//  teamcity-cli
//  tests/caller.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request caller behavior against an in-process transport that records
//! every request it is given.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use teamcity_cli::api::transport::{
    BoxError, HttpMethod, HttpTransport, TransportRequest, TransportResponse,
};
use teamcity_cli::api::resources::Feature;
use teamcity_cli::api::{ApiError, ContentType, RequestBody, TeamCityClient};
use teamcity_cli::fields::{BuildTypeField, BuildsField};
use teamcity_cli::locators::{
    BuildLocator, BuildStatus, BuildTypeLocator, InvestigationLocator, ProjectLocator,
    UserLocator,
};

/// Replies with queued responses, or with the fallback once the queue is
/// empty.
struct StubTransport {
    requests: Mutex<Vec<TransportRequest>>,
    queued: Mutex<VecDeque<Result<TransportResponse, String>>>,
    fallback: TransportResponse,
}

impl StubTransport {
    fn replying(status: u16, content_type: &str, body: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            queued: Mutex::new(VecDeque::new()),
            fallback: response(status, content_type, body),
        })
    }

    fn json(body: &str) -> Arc<Self> {
        Self::replying(200, "application/json", body)
    }

    fn enqueue(&self, reply: Result<TransportResponse, String>) {
        self.queued.lock().unwrap().push_back(reply);
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn last(&self) -> TransportRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

impl HttpTransport for StubTransport {
    fn execute(&self, request: TransportRequest) -> Result<TransportResponse, BoxError> {
        self.requests.lock().unwrap().push(request);
        match self.queued.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(message.into()),
            None => Ok(self.fallback.clone()),
        }
    }
}

fn response(status: u16, content_type: &str, body: &str) -> TransportResponse {
    TransportResponse {
        status,
        content_type: Some(content_type.to_string()),
        body: body.as_bytes().to_vec(),
    }
}

fn client(transport: &Arc<StubTransport>) -> TeamCityClient {
    let mut client =
        TeamCityClient::with_transport("ci.example.com", true, transport.clone()).unwrap();
    client.connect("admin", "secret");
    client
}

#[test]
fn cached_get_hits_transport_once() {
    let transport = StubTransport::json(r#"{"version":"2024.12"}"#);
    let client = client(&transport);
    client.enable_cache();

    let first = client.server().info().unwrap();
    let second = client.server().info().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.version.as_deref(), Some("2024.12"));
    assert_eq!(transport.calls(), 1);
}

#[test]
fn uncached_get_always_reaches_transport() {
    let transport = StubTransport::json(r#"{"version":"2024.12"}"#);
    let client = client(&transport);

    client.server().info().unwrap();
    client.server().info().unwrap();

    assert_eq!(transport.calls(), 2);
}

#[test]
fn disabling_cache_forces_refetch() {
    let transport = StubTransport::json(r#"{"version":"2024.12"}"#);
    let client = client(&transport);

    client.enable_cache();
    client.server().info().unwrap();
    client.disable_cache();
    client.enable_cache();
    client.server().info().unwrap();

    assert_eq!(transport.calls(), 2);
}

#[test]
fn different_accept_formats_are_cached_separately() {
    let transport = StubTransport::replying(200, "text/plain", "true");
    let client = client(&transport);
    client.enable_cache();

    client.get_text("buildTypes/id:Bt1/paused").unwrap();
    let _ = client.get::<serde_json::Value>(
        "buildTypes/id:Bt1/paused",
        &Default::default(),
        ContentType::Json,
    );

    assert_eq!(transport.calls(), 2);
}

#[test]
fn missing_credentials_fail_without_request() {
    let transport = StubTransport::json("{}");
    let client = TeamCityClient::with_transport("ci.example.com", true, transport.clone()).unwrap();

    let err = client.server().info().unwrap_err();
    assert!(matches!(err, ApiError::NotAuthenticated));

    let err = client.authenticate(false).unwrap_err();
    assert!(matches!(err, ApiError::NotAuthenticated));

    assert_eq!(transport.calls(), 0);
}

#[test]
fn statuses_map_to_error_variants() {
    let transport = StubTransport::json("{}");
    transport.enqueue(Ok(response(404, "text/plain", "No build types found")));
    transport.enqueue(Ok(response(403, "text/plain", "Forbidden")));
    transport.enqueue(Ok(response(
        500,
        "text/plain",
        "Error has occurred during request processing (Internal Server Error).\n\
         Error: java.lang.NullPointerException: boom",
    )));
    let client = client(&transport);

    let not_found = client.build_configs().by_locator(&BuildTypeLocator::with_id("Missing"));
    assert!(matches!(not_found, Err(ApiError::NotFound { status: 404 })));

    let forbidden = client.projects().all();
    assert!(matches!(forbidden, Err(ApiError::Authorization { status: 403 })));

    match client.server().info() {
        Err(ApiError::Transport { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("NullPointerException"));
        }
        other => panic!("expected a transport error, got {other:?}"),
    }
}

#[test]
fn transport_failure_is_connectivity() {
    let transport = StubTransport::json("{}");
    transport.enqueue(Err("connection refused".to_string()));
    let client = client(&transport);

    let err = client.server().info().unwrap_err();
    assert!(matches!(err, ApiError::Connectivity { .. }));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn invalid_locator_fails_before_request() {
    let transport = StubTransport::json("{}");
    let client = client(&transport);

    let err = client
        .projects()
        .by_locator(&ProjectLocator::new())
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidLocator(_)));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn build_config_with_nested_build_count() {
    let transport = StubTransport::json(r#"{"id":"X","builds":{"count":3}}"#);
    let client = client(&transport);

    let config = client
        .build_configs()
        .with_fields(BuildTypeField::with_fields().id().builds(BuildsField::with_fields().count()))
        .by_locator(&BuildTypeLocator::with_id("X"))
        .unwrap();

    assert_eq!(config.id, "X");
    assert_eq!(config.builds.and_then(|b| b.count), Some(3));

    let request = transport.last();
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url.path(), "/app/rest/buildTypes/id:X");
    let fields: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
    assert_eq!(fields, [("fields".to_string(), "id,builds(count)".to_string())]);
}

#[test]
fn xml_responses_are_decoded() {
    let transport = StubTransport::replying(
        200,
        "application/xml;charset=UTF-8",
        r#"<?xml version="1.0" encoding="UTF-8"?>
           <builds count="2">
             <build id="11" number="7" status="FAILURE" buildTypeId="Bt1"/>
             <build id="10" number="6" status="FAILURE" buildTypeId="Bt1"/>
           </builds>"#,
    );
    let client = client(&transport);

    let builds = client
        .builds()
        .by_locator(
            &BuildLocator::new()
                .build_type(BuildTypeLocator::with_id("Bt1"))
                .status(BuildStatus::Failure)
                .count(5),
        )
        .unwrap();

    assert_eq!(builds.len(), 2);
    assert_eq!(builds[0].id, Some(11));
    assert_eq!(builds[1].number.as_deref(), Some("6"));
    let url = transport.last().url;
    assert_eq!(url.path(), "/app/rest/builds");
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        query,
        [(
            "locator".to_string(),
            "buildType:(id:Bt1),status:FAILURE,count:5".to_string()
        )]
    );
}

#[test]
fn writes_clear_the_cache() {
    let transport = StubTransport::replying(200, "text/plain", "false");
    let client = client(&transport);
    client.enable_cache();
    let locator = BuildTypeLocator::with_id("Bt1");

    assert!(!client.build_configs().pause_status(&locator).unwrap());
    assert_eq!(client.cache().len(), 1);

    client.build_configs().set_pause_status(&locator, true).unwrap();
    assert!(client.cache().is_empty());

    let request = transport.last();
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(request.header("Content-Type"), Some("text/plain"));
    assert_eq!(request.body.as_deref(), Some(b"true".as_slice()));

    client.build_configs().pause_status(&locator).unwrap();
    assert_eq!(transport.calls(), 3);
}

#[test]
fn writes_are_never_served_from_cache() {
    let transport = StubTransport::replying(200, "text/plain", "");
    let client = client(&transport);
    client.enable_cache();

    client
        .post("builds/id:1/tags", RequestBody::xml("<tags/>"), ContentType::Xml)
        .unwrap();
    client
        .post("builds/id:1/tags", RequestBody::xml("<tags/>"), ContentType::Xml)
        .unwrap();

    assert_eq!(transport.calls(), 2);
    assert!(client.cache().is_empty());
}

#[test]
fn authenticate_reports_rejection_unless_asked_to_throw() {
    let transport = StubTransport::replying(401, "text/plain", "Authentication required");
    let client = client(&transport);

    assert!(!client.authenticate(false).unwrap());
    assert!(matches!(
        client.authenticate(true),
        Err(ApiError::Authorization { status: 401 })
    ));
    assert_eq!(transport.last().url.as_str(), "https://ci.example.com/app/rest/");
}

#[test]
fn guest_requests_carry_no_authorization() {
    let transport = StubTransport::json(r#"{"version":"2024.12"}"#);
    let mut client =
        TeamCityClient::with_transport("ci.example.com", true, transport.clone()).unwrap();
    client.connect_as_guest();
    client.use_version("latest");

    client.server().info().unwrap();

    let request = transport.last();
    assert_eq!(request.url.path(), "/guestAuth/app/rest/latest/server");
    assert_eq!(request.header("Authorization"), None);
    assert_eq!(request.header("Accept"), Some("application/json"));
}

#[test]
fn queued_builds_filter_by_locator_parameter() {
    let transport = StubTransport::json(
        r#"{"count":1,"build":[{"id":77,"state":"queued","buildTypeId":"Bt1"}]}"#,
    );
    let client = client(&transport);

    let queued = client
        .build_queue()
        .by_build_type(&BuildTypeLocator::with_id("Bt1"))
        .unwrap();

    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].state.as_deref(), Some("queued"));
    let url = transport.last().url;
    assert_eq!(url.path(), "/app/rest/buildQueue");
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        query,
        [("locator".to_string(), "buildType:(id:Bt1)".to_string())]
    );
}

#[test]
fn trigger_posts_escaped_build_request() {
    let transport = StubTransport::json(r#"{"id":78,"state":"queued","buildTypeId":"Bt1"}"#);
    let client = client(&transport);

    let queued = client
        .build_queue()
        .trigger("Bt1", Some("feature/a&b"))
        .unwrap();

    assert_eq!(queued.id, Some(78));
    let request = transport.last();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url.path(), "/app/rest/buildQueue");
    assert_eq!(request.header("Content-Type"), Some("application/xml"));
    let body = String::from_utf8(request.body.unwrap()).unwrap();
    assert_eq!(
        body,
        r#"<build branchName="feature/a&amp;b"><buildType id="Bt1"/></build>"#
    );
}

#[test]
fn cancel_posts_to_the_queued_build() {
    let transport = StubTransport::replying(200, "application/json", "{}");
    let client = client(&transport);

    client
        .build_queue()
        .cancel(&BuildLocator::with_id("78"), "not needed")
        .unwrap();

    let request = transport.last();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url.path(), "/app/rest/buildQueue/id:78");
}

#[test]
fn pause_status_of_missing_config_is_not_found() {
    let transport = StubTransport::replying(404, "text/plain", "No build type found by id 'Nope'");
    let client = client(&transport);

    let result = client
        .build_configs()
        .pause_status(&BuildTypeLocator::with_id("Nope"));

    assert!(matches!(result, Err(ApiError::NotFound { status: 404 })));
}

#[test]
fn flag_with_unexpected_body_is_a_decoding_error() {
    let transport = StubTransport::replying(200, "text/plain", "maybe");
    let client = client(&transport);

    let result = client.get_bool("buildTypes/id:Bt1/paused");
    assert!(matches!(result, Err(ApiError::Deserialization(_))));
}

#[test]
fn administrator_role_found_means_administrator() {
    let transport = StubTransport::json(
        r#"{"roleId":"SYSTEM_ADMIN","scope":"g","href":"/app/rest/users/username:alice/roles/SYSTEM_ADMIN/g"}"#,
    );
    let client = client(&transport);

    assert!(client.users().is_administrator("alice").unwrap());

    let request = transport.last();
    assert_eq!(
        request.url.path(),
        "/app/rest/users/username:alice/roles/SYSTEM_ADMIN/g"
    );
    assert_eq!(request.header("Accept"), Some("application/json"));
}

#[test]
fn administrator_role_missing_means_not_administrator() {
    let transport = StubTransport::replying(404, "text/plain", "Role not found");
    let client = client(&transport);

    assert!(!client.users().is_administrator("bob").unwrap());
}

#[test]
fn administrator_check_keeps_other_failures() {
    let transport = StubTransport::replying(403, "text/plain", "Forbidden");
    let client = client(&transport);

    assert!(matches!(
        client.users().is_administrator("bob"),
        Err(ApiError::Authorization { status: 403 })
    ));
}

fn query(request: &TransportRequest) -> Vec<(String, String)> {
    request.url.query_pairs().into_owned().collect()
}

fn body(request: TransportRequest) -> String {
    String::from_utf8(request.body.unwrap()).unwrap()
}

#[test]
fn statistics_are_read_from_the_build() {
    let transport = StubTransport::json(
        r#"{"count":2,"property":[{"name":"BuildDuration","value":"5100"},{"name":"SuccessRate","value":"1"}]}"#,
    );
    let client = client(&transport);

    let statistics = client.statistics().by_build_id("42").unwrap();

    assert_eq!(statistics.get("BuildDuration"), Some("5100"));
    assert_eq!(transport.last().url.path(), "/app/rest/builds/id:42/statistics");
}

#[test]
fn investigations_filter_by_locator_parameter() {
    let transport = StubTransport::json(
        r#"{"count":1,"investigation":[{"id":"x","state":"TAKEN","assignee":{"username":"alice"}}]}"#,
    );
    let client = client(&transport);

    let found = client
        .investigations()
        .by_locator(
            &InvestigationLocator::new()
                .assignee(UserLocator::with_username("alice"))
                .state("TAKEN"),
        )
        .unwrap();

    assert_eq!(found[0].state.as_deref(), Some("TAKEN"));
    let request = transport.last();
    assert_eq!(request.url.path(), "/app/rest/investigations");
    assert_eq!(
        query(&request),
        [(
            "locator".to_string(),
            "assignee:(username:alice),state:TAKEN".to_string()
        )]
    );
}

#[test]
fn investigations_of_a_build_type() {
    let transport = StubTransport::json(r#"{"count":0}"#);
    let client = client(&transport);

    assert!(client.investigations().by_build_type("Bt1").unwrap().is_empty());
    assert_eq!(
        query(&transport.last()),
        [("locator".to_string(), "buildType:(id:Bt1)".to_string())]
    );
}

#[test]
fn project_features_are_listed_and_fetched() {
    let transport = StubTransport::json(
        r#"{"count":1,"projectFeature":[{"id":"PROJECT_EXT_1","type":"IssueTracker"}]}"#,
    );
    transport.enqueue(Ok(response(
        200,
        "application/json",
        r#"{"id":"PROJECT_EXT_1","type":"IssueTracker","properties":{"property":[{"name":"repository","value":"org/repo"}]}}"#,
    )));
    let client = client(&transport);
    let project = ProjectLocator::with_id("P1");

    let feature = client.projects().feature(&project, "PROJECT_EXT_1").unwrap();
    assert_eq!(feature.get("repository"), Some("org/repo"));
    assert_eq!(
        transport.last().url.path(),
        "/app/rest/projects/id:P1/projectFeatures/id:PROJECT_EXT_1"
    );

    let features = client.projects().features(&project).unwrap();
    assert_eq!(features[0].kind.as_deref(), Some("IssueTracker"));
    assert_eq!(transport.last().url.path(), "/app/rest/projects/id:P1/projectFeatures");
}

#[test]
fn project_feature_is_created_and_deleted() {
    let transport = StubTransport::json(r#"{"id":"PROJECT_EXT_2","type":"ReportTab"}"#);
    let client = client(&transport);
    let project = ProjectLocator::with_id("P1");

    let created = client
        .projects()
        .create_feature(
            &project,
            &Feature::new("ReportTab").property("title", "Coverage & more"),
        )
        .unwrap();
    assert_eq!(created.id.as_deref(), Some("PROJECT_EXT_2"));

    let request = transport.last();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url.path(), "/app/rest/projects/id:P1/projectFeatures");
    assert_eq!(
        body(request),
        r#"<projectFeature type="ReportTab"><properties><property name="title" value="Coverage &amp; more"/></properties></projectFeature>"#
    );

    client.projects().delete_feature(&project, "PROJECT_EXT_2").unwrap();
    let request = transport.last();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(
        request.url.path(),
        "/app/rest/projects/id:P1/projectFeatures/id:PROJECT_EXT_2"
    );
}

#[test]
fn templates_are_read_attached_and_detached() {
    let transport = StubTransport::json(r#"{"count":1,"buildType":[{"id":"Tpl1"}]}"#);
    let client = client(&transport);
    let config = BuildTypeLocator::with_id("Bt1");

    let templates = client.build_configs().templates(&config).unwrap();
    assert_eq!(templates[0].id, "Tpl1");
    assert_eq!(transport.last().url.path(), "/app/rest/buildTypes/id:Bt1/templates");

    let attached = client
        .build_configs()
        .attach_templates(&config, &["Tpl1", "Tpl2"])
        .unwrap();
    assert_eq!(attached.len(), 1);
    let request = transport.last();
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(request.header("Content-Type"), Some("application/xml"));
    assert_eq!(
        body(request),
        r#"<buildTypes><buildType id="Tpl1"/><buildType id="Tpl2"/></buildTypes>"#
    );

    client.build_configs().detach_templates(&config).unwrap();
    let request = transport.last();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.url.path(), "/app/rest/buildTypes/id:Bt1/templates");
}

#[test]
fn raw_steps_are_posted_and_put_as_given() {
    let transport = StubTransport::json(r#"{"id":"RUNNER_1","type":"simpleRunner"}"#);
    transport.enqueue(Ok(response(
        200,
        "application/json",
        r#"{"id":"RUNNER_1","type":"simpleRunner"}"#,
    )));
    transport.enqueue(Ok(response(
        200,
        "application/json",
        r#"{"count":1,"step":[{"id":"RUNNER_1","type":"simpleRunner"}]}"#,
    )));
    let client = client(&transport);
    let config = BuildTypeLocator::with_id("Bt1");
    let step = r#"<step name="compile" type="simpleRunner"/>"#;

    let posted = client.build_configs().post_raw_step(&config, step).unwrap();
    assert_eq!(posted.id.as_deref(), Some("RUNNER_1"));
    let request = transport.last();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url.path(), "/app/rest/buildTypes/id:Bt1/steps");
    assert_eq!(body(request), step);

    let steps = format!("<steps>{step}</steps>");
    let replaced = client.build_configs().put_raw_steps(&config, &steps).unwrap();
    assert_eq!(replaced.len(), 1);
    let request = transport.last();
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(body(request), steps);
}

#[test]
fn steps_are_listed() {
    let transport = StubTransport::replying(
        200,
        "application/xml",
        r#"<steps count="1"><step id="RUNNER_1" name="compile" type="simpleRunner"/></steps>"#,
    );
    let client = client(&transport);

    let steps = client
        .build_configs()
        .steps(&BuildTypeLocator::with_id("Bt1"))
        .unwrap();
    assert_eq!(steps[0].name.as_deref(), Some("compile"));
}

#[test]
fn trigger_is_posted_as_xml() {
    let transport = StubTransport::json(r#"{"id":"TRIGGER_1","type":"vcsTrigger"}"#);
    let client = client(&transport);

    let trigger = Feature::new("vcsTrigger").property("branchFilter", "+:*");
    let stored = client
        .build_configs()
        .set_trigger(&BuildTypeLocator::with_id("Bt1"), &trigger)
        .unwrap();

    assert_eq!(stored.id.as_deref(), Some("TRIGGER_1"));
    let request = transport.last();
    assert_eq!(request.url.path(), "/app/rest/buildTypes/id:Bt1/triggers");
    assert_eq!(
        body(request),
        r#"<trigger type="vcsTrigger"><properties><property name="branchFilter" value="+:*"/></properties></trigger>"#
    );
}

#[test]
fn dependencies_are_read_and_added() {
    let transport = StubTransport::json(
        r#"{"count":1,"snapshot-dependency":[{"id":"Bt0","type":"snapshot_dependency","source-buildType":{"id":"Bt0"}}]}"#,
    );
    transport.enqueue(Ok(response(
        200,
        "application/json",
        r#"{"count":0}"#,
    )));
    transport.enqueue(Ok(response(
        200,
        "application/json",
        r#"{"id":"ARTIFACT_DEPENDENCY_1","type":"artifact_dependency"}"#,
    )));
    let client = client(&transport);
    let config = BuildTypeLocator::with_id("Bt1");

    assert!(client.build_configs().artifact_dependencies(&config).unwrap().is_empty());
    assert_eq!(
        transport.last().url.path(),
        "/app/rest/buildTypes/id:Bt1/artifact-dependencies"
    );

    let dependency = Feature::new("artifact_dependency")
        .property("pathRules", "app.zip")
        .source_build_type("Bt0");
    client
        .build_configs()
        .set_artifact_dependency(&config, &dependency)
        .unwrap();
    let request = transport.last();
    assert_eq!(request.method, HttpMethod::Post);
    assert!(body(request).ends_with(r#"<source-buildType id="Bt0"/></artifact-dependency>"#));

    let snapshots = client.build_configs().snapshot_dependencies(&config).unwrap();
    assert_eq!(
        snapshots[0].source_build_type.as_ref().map(|b| b.id.as_str()),
        Some("Bt0")
    );

    client
        .build_configs()
        .set_snapshot_dependency(&config, &Feature::new("snapshot_dependency").source_build_type("Bt0"))
        .unwrap();
    assert_eq!(
        transport.last().url.path(),
        "/app/rest/buildTypes/id:Bt1/snapshot-dependencies"
    );
}

#[test]
fn artifacts_of_last_successful_build_in_config() {
    let transport = StubTransport::replying(200, "application/octet-stream", "zipbytes");
    let client = client(&transport);

    let bytes = client
        .artifacts()
        .by_build_config("Bt1")
        .last_successful()
        .download("out/app.zip")
        .unwrap();

    assert_eq!(bytes, b"zipbytes");
    assert_eq!(
        transport.last().url.path(),
        "/app/rest/builds/buildType:(id:Bt1),status:SUCCESS/artifacts/files/out/app.zip"
    );
}

#[test]
fn artifacts_of_build_number_in_config() {
    let transport = StubTransport::json(r#"{"count":1,"file":[{"name":"app.zip","size":8}]}"#);
    let client = client(&transport);

    let files = client
        .artifacts()
        .by_build_config("Bt1")
        .specification("1.2.3")
        .list("")
        .unwrap();

    assert_eq!(files[0].name, "app.zip");
    assert_eq!(
        transport.last().url.path(),
        "/app/rest/builds/buildType:(id:Bt1),number:1.2.3/artifacts/children"
    );
}

/// Answers every request after a fixed delay.
struct SlowTransport {
    delay: Duration,
}

impl HttpTransport for SlowTransport {
    fn execute(&self, _request: TransportRequest) -> Result<TransportResponse, BoxError> {
        std::thread::sleep(self.delay);
        Ok(response(200, "application/json", r#"{"version":"2024.12"}"#))
    }
}

#[test]
fn caller_applies_no_timeout_of_its_own() {
    let transport = Arc::new(SlowTransport {
        delay: Duration::from_millis(400),
    });
    let mut client = TeamCityClient::with_transport("ci.example.com", true, transport).unwrap();
    client.connect("admin", "secret");

    let started = Instant::now();
    let info = client.server().info().unwrap();

    assert_eq!(info.version.as_deref(), Some("2024.12"));
    assert!(started.elapsed() >= Duration::from_millis(400));
}
