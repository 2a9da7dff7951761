//! Connection tests against a scripted in-memory channel.
//!
//! The mock answers each call with the next canned response and records
//! every request, so tests can check both what was sent and how the answer
//! was interpreted.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use deenair_sdk::crypto::{KeyPair, PublicKey};
use deenair_sdk::error::{Error, Result};
use deenair_sdk::network::{
    BlockRef, Connection, RpcChannel, RpcError, RpcMethod, RpcRequest, RpcResponse, Stake,
};
use deenair_sdk::program::{SystemProgram, TransferParams, FEE_RECEIVER};
use deenair_sdk::transaction::Transaction;

// ---------------------------------------------------------------------------
// Mock Channel
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockChannel {
    responses: Mutex<VecDeque<Result<Value, RpcError>>>,
    transport_down: bool,
    requests: Mutex<Vec<RpcRequest>>,
}

impl MockChannel {
    fn answering(results: impl IntoIterator<Item = Value>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(results.into_iter().map(Ok).collect()),
            ..Self::default()
        })
    }

    fn failing(error: RpcError) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::from([Err(error)])),
            ..Self::default()
        })
    }

    fn offline() -> Arc<Self> {
        Arc::new(Self {
            transport_down: true,
            ..Self::default()
        })
    }

    fn requests(&self) -> Vec<RpcRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn only_request(&self) -> RpcRequest {
        let mut requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.remove(0)
    }
}

#[async_trait]
impl RpcChannel for MockChannel {
    async fn call(&self, request: RpcRequest) -> Result<RpcResponse> {
        let id = request.id.clone();
        self.requests.lock().unwrap().push(request);
        if self.transport_down {
            return Err(Error::Transport("connection refused".into()));
        }
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no canned response left");
        Ok(match next {
            Ok(result) => RpcResponse::success(id, result),
            Err(error) => RpcResponse::error(id, error),
        })
    }
}

fn connect(channel: &Arc<MockChannel>) -> Connection<Arc<MockChannel>> {
    Connection::new(Arc::clone(channel))
}

fn wallet() -> PublicKey {
    PublicKey::from_base58("FaN54gXbj6mhDob8CXwHLLuGwgBGiiswdaMt6d1UmS3z").unwrap()
}

fn assert_rpc_error(err: Error, expected_context: &str) {
    match err {
        Error::Rpc { context, source } => {
            assert_eq!(context, expected_context);
            assert_eq!(source.message, "boom");
        }
        other => panic!("expected Rpc error, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_latest_block() {
    let channel = MockChannel::answering([json!({
        "blk": "51",
        "blkid": "3Dg9r",
        "trxs": null,
        "validator": "v1"
    })]);
    let block = connect(&channel)
        .get_block(BlockRef::Latest)
        .await
        .unwrap()
        .expect("block present");
    assert_eq!(block.blk, "51");
    assert!(block.trxs.is_none());

    let req = channel.only_request();
    assert_eq!(req.method, RpcMethod::GetBlock);
    assert_eq!(req.params, json!({}));
    assert_eq!(req.jsonrpc, "2.0");
}

#[tokio::test]
async fn get_block_by_number_sends_string() {
    let channel = MockChannel::answering([Value::Null]);
    let block = connect(&channel).get_block(BlockRef::Number(7)).await.unwrap();
    assert!(block.is_none());
    assert_eq!(channel.only_request().params, json!({ "blk": "7" }));
}

#[tokio::test]
async fn get_block_error_names_block() {
    let channel = MockChannel::failing(RpcError::new(-32000, "boom"));
    let err = connect(&channel).get_block(12.into()).await.unwrap_err();
    assert_rpc_error(err, "Failed to get block 12");

    let channel = MockChannel::failing(RpcError::new(-32000, "boom"));
    let err = connect(&channel).get_block(BlockRef::Latest).await.unwrap_err();
    assert_rpc_error(err, "Failed to get block latest");
}

#[tokio::test]
async fn get_node_list_and_leader() {
    let channel = MockChannel::answering([
        json!([{
            "comment": "main",
            "ip address": "10.0.0.1",
            "ip port": "8080",
            "nodeid": "n1",
            "public": "pk",
            "stake": "100",
            "storage": "1"
        }]),
        json!({ "nodeid": "n1" }),
    ]);
    let conn = connect(&channel);
    let nodes = conn.get_node_list().await.unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].ip_port, "8080");
    let leader = conn.get_leader().await.unwrap();
    assert_eq!(leader.nodeid, "n1");

    let methods: Vec<RpcMethod> = channel.requests().iter().map(|r| r.method).collect();
    assert_eq!(methods, [RpcMethod::GetNodeList, RpcMethod::GetLeader]);
    assert!(channel.requests().iter().all(|r| r.params == json!([])));
}

#[tokio::test]
async fn node_list_and_leader_errors() {
    let channel = MockChannel::failing(RpcError::new(1, "boom"));
    assert_rpc_error(
        connect(&channel).get_node_list().await.unwrap_err(),
        "Failed to get node list",
    );
    let channel = MockChannel::failing(RpcError::new(1, "boom"));
    assert_rpc_error(
        connect(&channel).get_leader().await.unwrap_err(),
        "Failed to get leader",
    );
}

#[tokio::test]
async fn get_wallet_state() {
    let channel = MockChannel::answering([json!({
        "balance": "10000",
        "last trx": "HFsmQ",
        "wallet": "FaN54gXbj6mhDob8CXwHLLuGwgBGiiswdaMt6d1UmS3z"
    })]);
    let state = connect(&channel).get_wallet_state(&wallet()).await.unwrap();
    assert_eq!(state.balance, "10000");
    assert_eq!(state.last_transaction, "HFsmQ");

    let req = channel.only_request();
    assert_eq!(req.method, RpcMethod::GetWalletState);
    assert_eq!(req.params, json!({ "wallet": wallet().to_base58() }));

    let channel = MockChannel::failing(RpcError::new(1, "boom"));
    assert_rpc_error(
        connect(&channel).get_wallet_state(&wallet()).await.unwrap_err(),
        "Failed to get wallet state",
    );
}

#[tokio::test]
async fn get_wallet_transactions() {
    let channel = MockChannel::answering([json!([{
        "status": "approved",
        "trxid": "HFsmQune59PB98MS1BbCVLZiHsNvBVUjrHfVJ24615sj",
        "type": "system",
        "votes": [{
            "author": "a", "block": "1", "round": "2", "sign": "s", "vote": "yes"
        }]
    }])]);
    let txs = connect(&channel)
        .get_wallet_transactions(&wallet())
        .await
        .unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].votes.as_ref().map(Vec::len), Some(1));
    assert_eq!(channel.only_request().method, RpcMethod::GetWalletTransactions);

    let channel = MockChannel::failing(RpcError::new(1, "boom"));
    assert_rpc_error(
        connect(&channel)
            .get_wallet_transactions(&wallet())
            .await
            .unwrap_err(),
        "Failed to get transactions for wallet FaN54gXbj6mhDob8CXwHLLuGwgBGiiswdaMt6d1UmS3z",
    );
}

#[tokio::test]
async fn get_transaction() {
    let channel = MockChannel::answering([json!({
        "status": "approved",
        "trxid": "abc",
        "type": "remittance",
        "msgs": []
    })]);
    let tx = connect(&channel).get_transaction("abc").await.unwrap();
    assert_eq!(tx.trxid, "abc");

    let req = channel.only_request();
    assert_eq!(req.method, RpcMethod::GetTransaction);
    assert_eq!(req.params, json!({ "trxid": "abc" }));

    let channel = MockChannel::failing(RpcError::new(1, "boom"));
    assert_rpc_error(
        connect(&channel).get_transaction("abc").await.unwrap_err(),
        "Failed to get transaction abc",
    );
}

#[tokio::test]
async fn token_queries() {
    let token = PublicKey::from_u64(99);
    let channel = MockChannel::answering([
        json!(["tok1", "tok2"]),
        json!({
            "coll": "c",
            "last trx": "t",
            "metadata": "{\"location\":\"https://x\"}",
            "owner": "o",
            "token": token.to_base58()
        }),
        json!({ "name": "Gold", "owner": "o", "token": token.to_base58() }),
        json!(["ft1"]),
    ]);
    let conn = connect(&channel);

    let ids = conn.get_nft_collection(&wallet()).await.unwrap();
    assert_eq!(ids, ["tok1", "tok2"]);
    let nft = conn.get_nft_info(&token).await.unwrap();
    assert_eq!(nft.metadata_json().unwrap()["location"], "https://x");
    let ft = conn.get_ft_info(&token).await.unwrap();
    assert_eq!(ft.name, "Gold");
    let list = conn.get_ft_list().await.unwrap();
    assert_eq!(list, ["ft1"]);

    let sent: Vec<(RpcMethod, Value)> = channel
        .requests()
        .into_iter()
        .map(|r| (r.method, r.params))
        .collect();
    assert_eq!(
        sent,
        [
            (RpcMethod::GetNftCollection, json!({ "coll": wallet().to_base58() })),
            (RpcMethod::GetNft, json!({ "token": token.to_base58() })),
            (RpcMethod::GetFt, json!({ "token": token.to_base58() })),
            (RpcMethod::GetFtList, json!([])),
        ]
    );
}

#[tokio::test]
async fn token_query_errors() {
    let token = PublicKey::from_u64(99);

    let channel = MockChannel::failing(RpcError::new(1, "boom"));
    assert_rpc_error(
        connect(&channel).get_nft_collection(&wallet()).await.unwrap_err(),
        "Failed to get token IDs for collection FaN54gXbj6mhDob8CXwHLLuGwgBGiiswdaMt6d1UmS3z",
    );

    let channel = MockChannel::failing(RpcError::new(1, "boom"));
    assert_rpc_error(
        connect(&channel).get_nft_info(&token).await.unwrap_err(),
        &format!("Failed to get token {token}"),
    );

    let channel = MockChannel::failing(RpcError::new(1, "boom"));
    assert_rpc_error(
        connect(&channel).get_ft_info(&token).await.unwrap_err(),
        &format!("Failed to get token {token}"),
    );

    let channel = MockChannel::failing(RpcError::new(1, "boom"));
    assert_rpc_error(
        connect(&channel).get_ft_list().await.unwrap_err(),
        "Failed to get FT list",
    );
}

// ---------------------------------------------------------------------------
// Stakes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_stakes_from_history() {
    const DAY: i64 = 86_400_000;
    let now = Utc::now().timestamp_millis();
    let message = |receiver: &str, sum: &str, age_days: i64, kind: &str| {
        json!({
            "comment": "",
            "payer": "me",
            "receiver": receiver,
            "sign": "",
            "sum": sum,
            "time": (now - age_days * DAY).to_string(),
            "type": kind
        })
    };
    let remittance = |msgs: Vec<Value>| {
        json!({ "status": "approved", "trxid": "t", "type": "remittance", "msgs": msgs })
    };
    let history = json!([
        remittance(vec![
            message("a", "100000", 15, "stake delegate"),
            message("b", "100000", 15, "stake delegate"),
        ]),
        remittance(vec![
            message("a", "100000", 7, "stake delegate"),
            message("b", "100000", 7, "stake delegate"),
        ]),
        remittance(vec![
            message("a", "50000", 7, "stake withdraw"),
            message("b", "50000", 7, "stake withdraw"),
        ]),
        { "status": "approved", "trxid": "s", "type": "system", "votes": [] },
    ]);

    let channel = MockChannel::answering([history]);
    let stakes = connect(&channel).get_stakes(&wallet()).await.unwrap();

    let expected = Stake {
        stake: 150_000,
        withdrawable: 50_000,
    };
    assert_eq!(stakes.len(), 2);
    assert_eq!(stakes["a"], expected);
    assert_eq!(stakes["b"], expected);
    assert_eq!(channel.only_request().method, RpcMethod::GetWalletTransactions);
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_transaction_posts_wire_form() {
    let payer = KeyPair::generate();
    let ix = SystemProgram::now()
        .transfer(TransferParams {
            payer: payer.public_key(),
            receiver: FEE_RECEIVER,
            amount: 10_000,
            comment: "test".into(),
        })
        .unwrap();
    let mut tx = Transaction::new();
    tx.add([ix]).unwrap();
    tx.add_signers([payer.clone()]);

    let channel = MockChannel::answering([json!("4hXo1TxId")]);
    let answer = connect(&channel).send_transaction(tx).await.unwrap();
    assert_eq!(answer, json!("4hXo1TxId"));

    let req = channel.only_request();
    assert_eq!(req.method, RpcMethod::NewTransaction);
    let messages = req.params["messages"].as_array().expect("messages array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["type"], 2);
    assert_eq!(messages[1]["amount"], 12_470);
    assert_eq!(messages[1]["payer"], payer.public_key().to_base58());
}

#[tokio::test]
async fn send_transaction_compile_error_sends_nothing() {
    let payer = KeyPair::generate();
    let ix = SystemProgram::now()
        .transfer(TransferParams {
            payer: payer.public_key(),
            receiver: FEE_RECEIVER,
            amount: 1,
            comment: String::new(),
        })
        .unwrap();
    let mut tx = Transaction::new();
    tx.add([ix]).unwrap();

    let channel = MockChannel::offline();
    let err = connect(&channel).send_transaction(tx).await.unwrap_err();
    assert!(matches!(err, Error::NoSigners));
    assert!(channel.requests().is_empty());
}

#[tokio::test]
async fn send_transaction_error_context() {
    let payer = KeyPair::generate();
    let ix = SystemProgram::now()
        .transfer(TransferParams {
            payer: payer.public_key(),
            receiver: FEE_RECEIVER,
            amount: 1,
            comment: String::new(),
        })
        .unwrap();
    let mut tx = Transaction::new();
    tx.add([ix]).unwrap();
    tx.add_signers([payer]);

    let channel = MockChannel::failing(RpcError::new(-32602, "boom"));
    assert_rpc_error(
        connect(&channel).send_transaction(tx).await.unwrap_err(),
        "Failed to create transaction",
    );
}

// ---------------------------------------------------------------------------
// Transport and decoding failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transport_failure_passes_through() {
    let channel = MockChannel::offline();
    match connect(&channel).get_leader().await {
        Err(Error::Transport(msg)) => assert_eq!(msg, "connection refused"),
        other => panic!("expected Transport error, got {:?}", other),
    }
    assert_eq!(channel.requests().len(), 1);
}

#[tokio::test]
async fn malformed_result_is_unexpected_response() {
    let channel = MockChannel::answering([json!({ "balance": 5 })]);
    match connect(&channel).get_wallet_state(&wallet()).await {
        Err(Error::UnexpectedResponse(msg)) => assert!(msg.starts_with("GetWalletState: ")),
        other => panic!("expected UnexpectedResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn request_ids_differ_between_calls() {
    let channel = MockChannel::answering([json!([]), json!([])]);
    let conn = connect(&channel);
    conn.get_ft_list().await.unwrap();
    conn.get_ft_list().await.unwrap();
    let requests = channel.requests();
    assert_ne!(requests[0].id, requests[1].id);
}
