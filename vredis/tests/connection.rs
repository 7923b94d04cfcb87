//! Connection lifecycle: lazy connect, reuse and replacement.

mod common;

use common::{MockConnector, request, session};
use pretty_assertions::assert_eq;
use vredis::{Session, SessionConfig, SharedConfig};

#[test]
fn test_connects_lazily() {
    let (mut session, connector) = session();

    let mut redis = session.scope(request(1));
    redis.command("PING").unwrap();
    assert!(connector.connects().is_empty());

    redis.execute();
    assert_eq!(connector.connects(), ["127.0.0.1:6379"]);
    assert!(session.is_connected());
}

#[test]
fn test_connection_reused_across_requests() {
    let (mut session, connector) = session();

    for sequence in 1..=3 {
        let mut redis = session.scope(request(sequence));
        redis.command("PING").unwrap();
        redis.execute();
    }

    assert_eq!(connector.connects().len(), 1);
    assert_eq!(
        connector.sent_on(),
        [
            (1, "PING".to_owned()),
            (1, "PING".to_owned()),
            (1, "PING".to_owned()),
        ]
    );
}

#[test]
fn test_broken_connection_is_replaced() {
    let (mut session, connector) = session();
    connector.transport_error();

    let mut redis = session.scope(request(1));
    redis.command("GET").unwrap();
    redis.push(Some("k")).unwrap();
    assert!(redis.execute().is_none());

    let mut redis = session.scope(request(2));
    redis.command("GET").unwrap();
    redis.push(Some("k")).unwrap();
    redis.execute();
    assert!(redis.is_status());

    assert_eq!(
        connector.sent_on(),
        [(1, "GET k".to_owned()), (2, "GET k".to_owned())]
    );
    assert_eq!(connector.open_connections(), 1);
}

#[test]
fn test_connect_failure_retried_on_next_execute() {
    let (mut session, connector) = session();
    connector.refuse_connects(1);

    let mut redis = session.scope(request(1));
    redis.command("PING").unwrap();
    assert!(redis.execute().is_none());
    assert!(connector.sent().is_empty());

    redis.execute();
    assert_eq!(redis.get_status().as_deref(), Some("OK"));
    assert_eq!(connector.connects().len(), 2);
    assert_eq!(connector.sent(), ["PING"]);
}

#[test]
fn test_broken_on_connect_is_discarded() {
    let (mut session, connector) = session();
    connector.broken_on_connect(1);

    let mut redis = session.scope(request(1));
    redis.command("PING").unwrap();
    assert!(redis.execute().is_none());
    assert!(!session.is_connected());
    assert_eq!(connector.open_connections(), 0);

    let mut redis = session.scope(request(2));
    redis.command("PING").unwrap();
    redis.execute();
    assert_eq!(connector.sent_on(), [(2, "PING".to_owned())]);
}

#[test]
fn test_no_reply_keeps_connection() {
    let (mut session, connector) = session();
    connector.no_reply();

    let mut redis = session.scope(request(1));
    redis.command("PING").unwrap();
    redis.execute();
    redis.execute();

    assert_eq!(connector.connects().len(), 1);
    assert_eq!(
        connector.sent_on(),
        [(1, "PING".to_owned()), (1, "PING".to_owned())]
    );
}

#[test]
fn test_configure_applies_to_new_connections() {
    let (mut session, connector) = session();

    let mut redis = session.scope(request(1));
    assert_eq!(redis.configure("10.0.0.9", 6380, 250), 1);
    redis.command("PING").unwrap();
    redis.execute();

    assert_eq!(connector.connects(), ["10.0.0.9:6380"]);
    assert_eq!(session.config().load().config.timeout_parts(), (0, 250_000));
}

#[test]
fn test_configure_keeps_open_connection() {
    let (mut session, connector) = session();

    let mut redis = session.scope(request(1));
    redis.command("PING").unwrap();
    redis.execute();

    redis.configure("10.0.0.9", 6380, 250);
    redis.execute();
    assert_eq!(connector.connects(), ["127.0.0.1:6379"]);

    // Only a replacement connection picks up the new endpoint.
    connector.transport_error();
    redis.execute();
    redis.execute();
    assert_eq!(connector.connects(), ["127.0.0.1:6379", "10.0.0.9:6380"]);
}

#[test]
fn test_sessions_share_configuration() {
    let config = SharedConfig::new(SessionConfig::from_millis("cache-a", 6379, 100));
    let first = MockConnector::new();
    let second = MockConnector::new();
    let mut one = Session::new(first.clone(), config.clone());
    let mut two = Session::new(second.clone(), config.clone());

    config.configure("cache-b", 7000, 100);
    for session in [&mut one, &mut two] {
        let mut redis = session.scope(request(1));
        redis.command("PING").unwrap();
        redis.execute();
    }

    assert_eq!(first.connects(), ["cache-b:7000"]);
    assert_eq!(second.connects(), ["cache-b:7000"]);
    assert_eq!(config.version(), 1);
}

#[test]
fn test_close_releases_connection() {
    let (mut session, connector) = session();

    let mut redis = session.scope(request(1));
    redis.command("PING").unwrap();
    redis.execute();
    assert_eq!(connector.open_connections(), 1);

    session.close();
    assert_eq!(connector.open_connections(), 0);
}

#[test]
fn test_drop_releases_connection() {
    let (mut session, connector) = session();

    let mut redis = session.scope(request(1));
    redis.command("PING").unwrap();
    redis.execute();

    drop(session);
    assert_eq!(connector.open_connections(), 0);
}
