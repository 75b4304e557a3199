//! WebSocket integration tests.
//!
//! Drives the relay end to end: joining, plain chat and the routed commands.

mod fixtures;
use fixtures::TestServer;

#[tokio::test]
async fn test_join_success_lists_members() {
    // テスト項目: 参加すると join_success にメンバー一覧が含まれ、既存メンバーに user_joined が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.join("alice").await;

    // when (操作):
    let mut bob = server.connect().await;
    bob.send(serde_json::json!({"event": "join", "data": {"username": "bob"}}))
        .await;

    // then (期待する結果):
    let success = bob.expect_event("join_success").await;
    assert_eq!(success["data"]["users"], serde_json::json!(["alice", "bob"]));

    let joined = alice.recv().await;
    assert_eq!(joined["event"], "user_joined");
    assert_eq!(joined["data"]["username"], "bob");
    assert_eq!(joined["data"]["users"], serde_json::json!(["alice", "bob"]));
}

#[tokio::test]
async fn test_join_with_taken_name() {
    // テスト項目: 使用中の名前で参加すると本人にだけ join_error が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.join("alice").await;

    // when (操作):
    let mut impostor = server.connect().await;
    impostor
        .send(serde_json::json!({"event": "join", "data": {"username": "alice"}}))
        .await;

    // then (期待する結果):
    let error = impostor.recv().await;
    assert_eq!(error["event"], "join_error");
    assert_eq!(error["data"]["message"], "username already exists");
    alice.expect_silence().await;
}

#[tokio::test]
async fn test_concurrent_joins_with_same_name() {
    // テスト項目: 同じ名前で同時に参加すると片方だけが成功する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut first = server.connect().await;
    let mut second = server.connect().await;
    let join = serde_json::json!({"event": "join", "data": {"username": "Bob"}});

    // when (操作):
    tokio::join!(first.send(join.clone()), second.send(join.clone()));

    // then (期待する結果):
    let a = first.recv().await;
    let b = second.recv().await;
    let (winner, loser) = if a["event"] == "join_success" {
        (a, b)
    } else {
        (b, a)
    };
    assert_eq!(winner["event"], "join_success");
    assert_eq!(winner["data"]["users"], serde_json::json!(["Bob"]));
    assert_eq!(loser["event"], "join_error");
    assert_eq!(loser["data"]["message"], "username already exists");
}

#[tokio::test]
async fn test_leave_then_rejoin() {
    // テスト項目: 退出後に同じ名前で再参加できる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut observer = server.join("observer").await;
    let alice = server.join("alice").await;
    observer.expect_event("user_joined").await;

    // when (操作):
    alice.close().await;
    let left = observer.expect_event("user_left").await;
    let _alice = server.join("alice").await;

    // then (期待する結果):
    assert_eq!(left["data"]["username"], "alice");
    assert_eq!(left["data"]["users"], serde_json::json!(["observer"]));
    let rejoined = observer.expect_event("user_joined").await;
    assert_eq!(rejoined["data"]["username"], "alice");
}

#[tokio::test]
async fn test_plain_message_is_broadcast_once() {
    // テスト項目: 通常メッセージが全員に一度だけ届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.join("alice").await;
    let mut bob = server.join("bob").await;
    alice.expect_event("user_joined").await;

    // when (操作):
    alice.say("alice", "hello room").await;

    // then (期待する結果):
    for client in [&mut alice, &mut bob] {
        let frame = client.recv().await;
        assert_eq!(frame["event"], "new_message");
        assert_eq!(frame["data"]["username"], "alice");
        assert_eq!(frame["data"]["message"], "hello room");
        assert_eq!(frame["data"]["time"].as_str().unwrap().len(), 8);
        assert!(frame["data"].get("weather").is_none());
        client.expect_silence().await;
    }
}

#[tokio::test]
async fn test_sender_name_comes_from_session() {
    // テスト項目: ペイロードの username ではなく参加時の名前で配信される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.join("alice").await;

    // when (操作):
    alice.say("mallory", "hi").await;

    // then (期待する結果):
    let frame = alice.expect_event("new_message").await;
    assert_eq!(frame["data"]["username"], "alice");
}

#[tokio::test]
async fn test_message_before_join_is_ignored() {
    // テスト項目: 参加前のメッセージは配信されない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.join("alice").await;
    let mut stranger = server.connect().await;

    // when (操作):
    stranger.say("stranger", "anyone?").await;

    // then (期待する結果):
    alice.expect_silence().await;
    stranger.expect_silence().await;
}

#[tokio::test]
async fn test_malformed_frame_keeps_connection_open() {
    // テスト項目: 不正な JSON は無視され、接続はそのまま使える
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.join("alice").await;

    // when (操作):
    alice.send_raw("not json").await;
    alice
        .send(serde_json::json!({"event": "unknown_event", "data": {}}))
        .await;
    alice.say("alice", "still here").await;

    // then (期待する結果):
    let frame = alice.recv().await;
    assert_eq!(frame["event"], "new_message");
    assert_eq!(frame["data"]["message"], "still here");
}

#[tokio::test]
async fn test_weather_command() {
    // テスト項目: @天気 コマンドで天気レポートが全員に配信される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.join("alice").await;

    // when (操作):
    alice.say("alice", "@天气 北京").await;

    // then (期待する結果):
    let frame = alice.recv().await;
    assert_eq!(frame["event"], "new_message");
    assert_eq!(frame["data"]["username"], "系统");
    assert_eq!(
        frame["data"]["message"],
        "北京天气：晴，温度20℃，湿度40%，东3级"
    );
    assert_eq!(frame["data"]["weather"]["city"], "北京");
}

#[tokio::test]
async fn test_weather_command_unknown_city() {
    // テスト項目: 見つからない都市は系统メッセージで通知される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.join("alice").await;

    // when (操作):
    alice.say("alice", "@天气 火星").await;

    // then (期待する結果):
    let frame = alice.recv().await;
    assert_eq!(frame["data"]["username"], "系统");
    assert_eq!(frame["data"]["message"], "未找到城市「火星」的天气信息");
}

#[tokio::test]
async fn test_movie_command() {
    // テスト項目: @电影 コマンドでリンクが正規化され解析 URL が付与される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.join("alice").await;

    // when (操作):
    alice.say("alice", "@电影 example.com/video").await;

    // then (期待する結果):
    let frame = alice.recv().await;
    assert_eq!(frame["event"], "movie_request");
    assert_eq!(frame["data"]["username"], "alice");
    assert_eq!(frame["data"]["original_url"], "https://example.com/video");
    assert_eq!(
        frame["data"]["parsed_url"],
        "https://jx.xmflv.com/?url=https%3A%2F%2Fexample.com%2Fvideo"
    );
    assert_eq!(frame["data"]["has_proxy"], true);
}

#[tokio::test]
async fn test_chatbot_command() {
    // テスト項目: @雨姐 コマンドで ai_request の後に ai_response が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.join("alice").await;

    // when (操作):
    alice.say("alice", "@雨姐 你好").await;

    // then (期待する結果):
    let request = alice.recv().await;
    assert_eq!(request["event"], "ai_request");
    assert_eq!(request["data"]["query"], "你好");

    let response = alice.recv().await;
    assert_eq!(response["event"], "ai_response");
    assert_eq!(response["data"]["username"], "雨姐");
    let reply = response["data"]["message"].as_str().unwrap();
    assert!(!reply.is_empty());
    assert_ne!(reply, "你好");
}

#[tokio::test]
async fn test_chatbot_reply_survives_sender_disconnect() {
    // テスト項目: 送信者が応答待ちの間に切断しても、ルームには ai_response が届く
    // given (前提条件):
    let mut config = chaguan_server::config::AppConfig::default();
    config.chatbot.thinking_delay_ms = 300;
    let server = TestServer::start_with(config).await;
    let mut alice = server.join("alice").await;
    let mut bob = server.join("bob").await;
    alice.expect_event("user_joined").await;

    // when (操作):
    alice.say("alice", "@雨姐 你好").await;
    alice.expect_event("ai_request").await;
    alice.drop_connection();
    // 切断済みのソケットへの書き込みを発生させる
    bob.say("bob", "alice?").await;
    bob.say("bob", "还在吗").await;

    // then (期待する結果):
    bob.expect_event("ai_request").await;
    let response = bob.expect_event("ai_response").await;
    assert_eq!(response["data"]["username"], "雨姐");
    let left = bob.expect_event("user_left").await;
    assert_eq!(left["data"]["username"], "alice");
}
