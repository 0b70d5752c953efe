use netlify_subdomain::netlify::client::{error_message, split_status};
use netlify_subdomain::netlify::credentials::{linked_site_id, token_from_cli_config};
use netlify_subdomain::netlify::{
    DnsRecord, DnsZone, NewDnsRecord, Site, SitePatch, find_cname, find_site, find_zone,
};

#[test]
fn split_status_with_body() {
    let (status, body) = split_status("{\"id\":\"abc\"}\n200").unwrap();
    assert_eq!(status, 200);
    assert_eq!(body, "{\"id\":\"abc\"}");
}

#[test]
fn split_status_multiline_body() {
    let (status, body) = split_status("[\n  1,\n  2\n]\n201").unwrap();
    assert_eq!(status, 201);
    assert_eq!(body, "[\n  1,\n  2\n]");
}

#[test]
fn split_status_empty_body() {
    let (status, body) = split_status("204").unwrap();
    assert_eq!(status, 204);
    assert_eq!(body, "");
}

#[test]
fn split_status_garbage() {
    assert!(split_status("<html>oops</html>").is_err());
}

#[test]
fn error_message_from_json() {
    assert_eq!(
        error_message(r#"{"code":404,"message":"Not Found"}"#),
        "Not Found"
    );
    assert_eq!(error_message(r#"{"error":"forbidden"}"#), "forbidden");
}

#[test]
fn error_message_raw_body() {
    assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    assert_eq!(error_message(""), "empty response");
}

#[test]
fn token_of_current_user() {
    let conf = r#"{
        "userId": "u2",
        "users": {
            "u1": {"id": "u1", "auth": {"token": "first"}},
            "u2": {"id": "u2", "auth": {"token": "second"}}
        }
    }"#;
    assert_eq!(token_from_cli_config(conf), Some("second".into()));
}

#[test]
fn token_without_user_id() {
    let conf = r#"{"users": {"u1": {"auth": {"token": "only"}}}}"#;
    assert_eq!(token_from_cli_config(conf), Some("only".into()));
}

#[test]
fn token_missing() {
    assert_eq!(token_from_cli_config(r#"{"telemetryDisabled": true}"#), None);
    assert_eq!(token_from_cli_config(r#"{"users": {}}"#), None);
    assert_eq!(
        token_from_cli_config(r#"{"users": {"u1": {"auth": {"token": ""}}}}"#),
        None
    );
    assert_eq!(token_from_cli_config("not json"), None);
}

#[test]
fn linked_site_from_state_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join(".netlify")).unwrap();
    std::fs::write(
        dir.path().join(".netlify").join("state.json"),
        r#"{"siteId": "3c5e8f0a-1b2c-4d3e-9f00-a1b2c3d4e5f6"}"#,
    )
    .unwrap();

    assert_eq!(
        linked_site_id(dir.path()),
        Some("3c5e8f0a-1b2c-4d3e-9f00-a1b2c3d4e5f6".into())
    );
}

#[test]
fn no_linked_site() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(linked_site_id(dir.path()), None);
}

#[test]
fn deserialize_site_with_nulls() {
    let json = r#"{
        "id": "site-1",
        "name": "juice-box-musical",
        "url": "https://juice-box-musical.netlify.app",
        "default_domain": "juice-box-musical.netlify.app",
        "custom_domain": null,
        "domain_aliases": null,
        "build_settings": {"cmd": "npm run build"}
    }"#;
    let site: Site = serde_json::from_str(json).unwrap();

    assert_eq!(site.name, "juice-box-musical");
    assert_eq!(site.custom_domain(), None);
    assert!(site.domain_aliases.is_empty());
}

#[test]
fn empty_custom_domain_is_unset() {
    let site = Site {
        custom_domain: Some(String::new()),
        ..Site::default()
    };
    assert_eq!(site.custom_domain(), None);
}

#[test]
fn deserialize_zone_and_record() {
    let zone: DnsZone =
        serde_json::from_str(r#"{"id":"z1","name":"example.com","records_count":4}"#).unwrap();
    assert_eq!(zone.records_count, 4);

    let record: DnsRecord = serde_json::from_str(
        r#"{"id":"r1","hostname":"blog.example.com","type":"CNAME","value":"x.netlify.app","ttl":3600}"#,
    )
    .unwrap();
    assert_eq!(record.record_type, "CNAME");
    assert_eq!(record.ttl, Some(3600));
}

#[test]
fn new_record_body() {
    let body = serde_json::to_value(NewDnsRecord::cname("blog", "x.netlify.app")).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "type": "CNAME",
            "hostname": "blog",
            "value": "x.netlify.app",
            "ttl": 3600
        })
    );
}

#[test]
fn site_patch_only_sends_set_fields() {
    let custom = serde_json::to_value(SitePatch::custom_domain("blog.example.com")).unwrap();
    assert_eq!(
        custom,
        serde_json::json!({"custom_domain": "blog.example.com"})
    );

    let aliases = serde_json::to_value(SitePatch::domain_aliases(vec!["a.example.com".into()]))
        .unwrap();
    assert_eq!(
        aliases,
        serde_json::json!({"domain_aliases": ["a.example.com"]})
    );
}

fn site(id: &str, name: &str, custom: Option<&str>) -> Site {
    Site {
        id: id.into(),
        name: name.into(),
        default_domain: format!("{name}.netlify.app"),
        custom_domain: custom.map(String::from),
        ..Site::default()
    }
}

#[test]
fn find_site_by_name_then_domain() {
    let sites = vec![
        site("1", "danielleworld", Some("danielle.world")),
        site("2", "juice-box-musical", None),
    ];

    assert_eq!(find_site(&sites, "juice-box-musical").unwrap().id, "2");
    assert_eq!(find_site(&sites, "danielle.world").unwrap().id, "1");
    assert_eq!(
        find_site(&sites, "juice-box-musical.netlify.app").unwrap().id,
        "2"
    );
    assert!(find_site(&sites, "missing").is_none());
}

#[test]
fn find_zone_exact_match() {
    let zones = vec![DnsZone {
        id: "z1".into(),
        name: "example.com".into(),
        records_count: 0,
    }];
    assert!(find_zone(&zones, "example.com").is_some());
    assert!(find_zone(&zones, "sub.example.com").is_none());
}

#[test]
fn find_cname_ignores_other_types() {
    let records = vec![
        DnsRecord {
            id: "r1".into(),
            hostname: "blog.example.com".into(),
            record_type: "TXT".into(),
            value: "v=spf1".into(),
            ttl: None,
        },
        DnsRecord {
            id: "r2".into(),
            hostname: "blog.example.com".into(),
            record_type: "CNAME".into(),
            value: "x.netlify.app".into(),
            ttl: Some(3600),
        },
    ];
    assert_eq!(find_cname(&records, "blog.example.com").unwrap().id, "r2");
    assert!(find_cname(&records, "api.example.com").is_none());
}
