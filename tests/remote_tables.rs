use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use biosynonyms::{
    ResourceConfig, SynonymError, TableOptions, get_positive_synonyms, parse_table,
};

const TABLE: &str = "text\tcurie\tname\tpredicate\n\
                     YAL021C\tsgd:S000000019\tCCR4\toboInOwl:hasExactSynonym\n";

fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 1024];
        let _ = stream.read(&mut request);
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/tab-separated-values\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        let _ = stream.flush();
    });
    (format!("http://{addr}/positives.tsv"), handle)
}

#[test]
fn url_sources_are_fetched_and_parsed() {
    let (url, server) = serve_once("200 OK", TABLE);
    let records = parse_table(url.as_str(), None, None).unwrap();
    server.join().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].curie(), "sgd:S000000019");
    assert_eq!(records[0].name(), "CCR4");
}

#[test]
fn configured_remote_positives_use_the_configured_timeout() {
    let (url, server) = serve_once("200 OK", TABLE);
    let config = ResourceConfig::default()
        .with_positives(url)
        .with_fetch_timeout(Duration::from_secs(5));
    assert_eq!(config.table_options().fetch_timeout, Duration::from_secs(5));
    let records = get_positive_synonyms(&config).unwrap();
    server.join().unwrap();
    assert_eq!(records[0].text, "YAL021C");
}

#[test]
fn error_status_is_a_fetch_error_without_retry() {
    let (url, server) = serve_once("500 Internal Server Error", "boom");
    let err = parse_table(url.as_str(), None, None).unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, SynonymError::Fetch { url: failed, .. } if failed == url));
}

#[test]
fn default_options_use_the_standard_timeout() {
    assert_eq!(TableOptions::default().fetch_timeout, Duration::from_secs(30));
}
