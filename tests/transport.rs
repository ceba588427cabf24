// tests/transport.rs
//! The HTTP client against local sockets that refuse or drop connections.

mod common;

use common::recording_fetch;
use std::io::Read;
use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use testrail_frames::{
    BaseUrl, ClientConfig, Endpoint, Filters, Password, ProjectId, TestRail, TestRailApi,
    TestRailError, TestRailHttpClient, Username,
};

fn project() -> ProjectId {
    ProjectId::new(1).unwrap()
}

fn client_for(addr: SocketAddr) -> TestRailHttpClient {
    let config = ClientConfig::new(
        BaseUrl::parse(&format!("http://{}/", addr)).unwrap(),
        Username::new("example@mail.com").unwrap(),
        Password::new("password").unwrap(),
    );
    TestRailHttpClient::new(config).unwrap()
}

/// A local address with nothing listening on it.
fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Accepts connections, reads the request and hangs up without answering.
fn hang_up_server() -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&accepted);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else {
                continue;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
        }
    });

    (addr, accepted)
}

#[test]
fn refused_connection_replaces_the_session() {
    let client = client_for(refused_addr());

    let err = client
        .get_page(&Endpoint::Plans(project()), &Filters::new())
        .unwrap_err();

    assert!(matches!(err, TestRailError::Connection(_)));
    assert!(err.is_transient());
    assert_eq!(client.session_resets(), 1);
}

#[test]
fn refused_connection_is_retried_by_the_fetcher() {
    let client = client_for(refused_addr());
    let (fetch, sleeps) = recording_fetch();
    let testrail = TestRail::with_fetch(&client, fetch);

    let err = testrail
        .plans()
        .to_dataframe(project(), &Filters::new())
        .unwrap_err();

    assert!(matches!(err, TestRailError::Connection(_)));
    assert_eq!(*sleeps.lock(), vec![Duration::from_secs(2); 4]);
    assert_eq!(client.session_resets(), 5);
}

#[test]
fn connection_dropped_before_a_response_is_retried() {
    let (addr, accepted) = hang_up_server();
    let client = client_for(addr);
    let (fetch, sleeps) = recording_fetch();
    let testrail = TestRail::with_fetch(&client, fetch);

    let err = testrail
        .plans()
        .to_dataframe(project(), &Filters::new())
        .unwrap_err();

    assert!(matches!(err, TestRailError::Connection(_)));
    assert_eq!(sleeps.lock().len(), 4);
    assert_eq!(accepted.load(Ordering::SeqCst), 5);
    assert_eq!(client.session_resets(), 5);
}
