use dnsrelay_application::ports::{ResolutionCachePort, TransactionMuxPort};
use dnsrelay_domain::wire::{self, RESPONSE_TTL};
use dnsrelay_domain::ResponseCode;
use std::net::Ipv4Addr;

mod helpers;
use helpers::*;

const QTYPE_A: u16 = 1;

#[tokio::test]
async fn test_miss_is_forwarded_relayed_and_cached() {
    let relay = RelayHarness::start().await;
    let client = client().await;

    client
        .send_to(&query_packet(0x1234, "foo.com", QTYPE_A), relay.relay_addr)
        .await
        .unwrap();

    let (forwarded, from) = relay.upstream_recv().await;
    assert_eq!(from, relay.relay_addr);
    let server_id = wire::peek_header(&forwarded).unwrap().id;
    assert_ne!(server_id, 0);
    assert_eq!(&forwarded[2..], &query_packet(0x1234, "foo.com", QTYPE_A)[2..]);

    let a = Ipv4Addr::new(1, 2, 3, 4);
    let b = Ipv4Addr::new(5, 6, 7, 8);
    relay
        .upstream_reply(&response_packet(server_id, "foo.com", &[(a, 60), (b, 60)]))
        .await;

    let (reply, _) = recv(&client).await;
    let message = wire::decode(&reply).unwrap();
    assert_eq!(message.header.id, 0x1234);
    let mut addresses: Vec<Ipv4Addr> = message.answer_addresses().map(|(ip, _)| ip).collect();
    addresses.sort();
    assert_eq!(addresses, vec![a, b]);

    assert!(eventually(|| relay.mux.live_count() == 0).await);
    let mut cached = relay.cache.query("foo.com").unwrap().addresses;
    cached.sort();
    assert_eq!(cached, vec![a, b]);
}

#[tokio::test]
async fn test_second_query_is_answered_from_cache() {
    let relay = RelayHarness::start().await;
    let client = client().await;
    let a = Ipv4Addr::new(9, 9, 9, 9);

    client
        .send_to(&query_packet(7, "bar.org", QTYPE_A), relay.relay_addr)
        .await
        .unwrap();
    let (forwarded, _) = relay.upstream_recv().await;
    let server_id = wire::peek_header(&forwarded).unwrap().id;
    relay
        .upstream_reply(&response_packet(server_id, "bar.org", &[(a, 600)]))
        .await;
    recv(&client).await;
    assert!(eventually(|| relay.cache.query("bar.org").is_some()).await);

    client
        .send_to(&query_packet(8, "BAR.org", QTYPE_A), relay.relay_addr)
        .await
        .unwrap();
    let (reply, _) = recv(&client).await;
    let message = wire::decode(&reply).unwrap();
    assert_eq!(message.header.id, 8);
    assert!(!message.header.authoritative);
    assert_eq!(message.answer_addresses().collect::<Vec<_>>(), vec![(a, RESPONSE_TTL)]);

    assert!(stays_silent(&relay.upstream).await);
    assert_eq!(relay.relay.metrics().snapshot().cache_hits, 1);
}

#[tokio::test]
async fn test_static_entry_answers_authoritatively() {
    let relay = RelayHarness::start().await;
    relay.add_static("printer.lan", "192.168.1.20");
    let client = client().await;

    client
        .send_to(&query_packet(0xBEEF, "printer.lan", QTYPE_A), relay.relay_addr)
        .await
        .unwrap();

    let (reply, _) = recv(&client).await;
    let message = wire::decode(&reply).unwrap();
    assert_eq!(message.header.id, 0xBEEF);
    assert!(message.header.response);
    assert!(message.header.authoritative);
    assert_eq!(message.header.response_code, ResponseCode::NoError);
    assert_eq!(message.questions[0].name, "printer.lan");
    assert_eq!(
        message.answer_addresses().collect::<Vec<_>>(),
        vec![(Ipv4Addr::new(192, 168, 1, 20), RESPONSE_TTL)]
    );
    assert!(stays_silent(&relay.upstream).await);
}

#[tokio::test]
async fn test_blocked_entry_answers_nxdomain() {
    let relay = RelayHarness::start().await;
    relay.add_static("ads.example", "0.0.0.0");
    let client = client().await;

    client
        .send_to(&query_packet(3, "ads.example", QTYPE_A), relay.relay_addr)
        .await
        .unwrap();

    let (reply, _) = recv(&client).await;
    let message = wire::decode(&reply).unwrap();
    assert_eq!(message.header.response_code, ResponseCode::NxDomain);
    assert!(message.answers.is_empty());
}

#[tokio::test]
async fn test_response_with_unknown_id_is_dropped() {
    let relay = RelayHarness::start().await;
    let client = client().await;

    relay
        .upstream_reply(&response_packet(
            999,
            "stray.net",
            &[(Ipv4Addr::new(10, 0, 0, 1), 60)],
        ))
        .await;

    assert!(eventually(|| relay.relay.metrics().snapshot().dropped == 1).await);
    assert!(relay.cache.query("stray.net").is_none());
    assert!(stays_silent(&client).await);
}

#[tokio::test]
async fn test_non_a_query_is_forwarded_with_payload_intact() {
    let relay = RelayHarness::start().await;
    relay.add_static("foo.com", "1.1.1.1");
    let client = client().await;
    let query = query_packet(42, "foo.com", 28);

    client.send_to(&query, relay.relay_addr).await.unwrap();

    let (forwarded, _) = relay.upstream_recv().await;
    assert_eq!(forwarded.len(), query.len());
    assert_eq!(&forwarded[2..], &query[2..]);

    let server_id = wire::peek_header(&forwarded).unwrap().id;
    let binding = relay.mux.lookup(server_id).unwrap();
    assert_eq!(binding.client_id, 42);
    assert_eq!(binding.client_addr, client.local_addr().unwrap());
}
