use futures_util::{SinkExt, StreamExt};
use tic_tac_toe_web::message::ServerMessage;
use tic_tac_toe_web::server::serve_websocket;
use tic_tac_toe_web::{GameStatus, PlayerDefaults, PlayerSlot, SessionPhase, Snapshot};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect() -> Client {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_websocket(listener, PlayerDefaults::default()));
    let (client, _) = connect_async(format!("ws://{addr}")).await.unwrap();
    client
}

async fn next_message(client: &mut Client) -> ServerMessage {
    loop {
        let frame = client.next().await.unwrap().unwrap();
        if let Message::Text(text) = frame {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

async fn next_state(client: &mut Client) -> Snapshot {
    match next_message(client).await {
        ServerMessage::State(snapshot) => snapshot,
        other => panic!("expected a state frame, got {other:?}"),
    }
}

async fn send(client: &mut Client, json: &str) {
    client.send(Message::Text(json.to_string())).await.unwrap();
}

async fn mark(client: &mut Client, row: usize, column: usize) -> Snapshot {
    let json = format!(r#"{{"type":"MARK_CELL","row":{row},"column":{column}}}"#);
    send(client, &json).await;
    next_state(client).await
}

/// Connects, reads the start screen, and presses Start.
async fn start(client: &mut Client) -> Snapshot {
    next_state(client).await;
    send(client, r#"{"type":"START"}"#).await;
    next_state(client).await
}

#[tokio::test]
async fn client_receives_initial_state_and_its_moves() {
    let mut client = connect().await;

    let initial = next_state(&mut client).await;
    assert_eq!(initial.phase, SessionPhase::Idle);
    assert_eq!(initial.info, "Click Start to Play!");

    send(&mut client, r#"{"type":"START"}"#).await;
    let started = next_state(&mut client).await;
    assert_eq!(started.status, GameStatus::Running);
    assert_eq!(started.active_player, PlayerSlot::One);
    assert_eq!(started.info, "Player 1's Turn");

    let after_mark = mark(&mut client, 1, 1).await;
    assert_eq!(after_mark.cells[1][1], Some('X'));
    assert_eq!(after_mark.active_player, PlayerSlot::Two);

    let repeated = mark(&mut client, 1, 1).await;
    assert_eq!(repeated, after_mark);
}

#[tokio::test]
async fn full_round_then_restart_over_the_wire() {
    let mut client = connect().await;
    start(&mut client).await;

    for (row, column) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
        mark(&mut client, row, column).await;
    }
    send(&mut client, r#"{"type":"REFRESH"}"#).await;
    let ended = next_state(&mut client).await;
    assert_eq!(ended.status, GameStatus::Ended);
    assert_eq!(ended.winner, Some(PlayerSlot::One));
    assert_eq!(ended.info, "Player 1 Win!");

    send(&mut client, r#"{"type":"RESTART"}"#).await;
    let restarted = next_state(&mut client).await;
    assert_eq!(restarted.status, GameStatus::Running);
    assert_eq!(restarted.players[0].wins, 1);
    assert_eq!(restarted.players[1].losses, 1);

    send(&mut client, r#"{"type":"EXIT"}"#).await;
    let exited = next_state(&mut client).await;
    assert_eq!(exited.phase, SessionPhase::Idle);
    assert_eq!(exited.players[0].wins, 1);
    assert_eq!(mark(&mut client, 0, 0).await.cells[0][0], None);
}

#[tokio::test]
async fn bad_frames_get_error_replies() {
    let mut client = connect().await;
    start(&mut client).await;

    send(&mut client, "not json").await;
    assert!(matches!(next_message(&mut client).await, ServerMessage::Error { .. }));

    send(&mut client, r#"{"type":"MARK_CELL","row":3,"column":0}"#).await;
    match next_message(&mut client).await {
        ServerMessage::Error { text } => assert!(text.contains("Invalid coordinate")),
        other => panic!("expected an error frame, got {other:?}"),
    }

    // the session survives both
    assert_eq!(mark(&mut client, 0, 0).await.cells[0][0], Some('X'));
}

#[tokio::test]
async fn each_connection_has_its_own_game() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_websocket(listener, PlayerDefaults::default()));

    let (mut first, _) = connect_async(format!("ws://{addr}")).await.unwrap();
    let (mut second, _) = connect_async(format!("ws://{addr}")).await.unwrap();
    start(&mut first).await;
    start(&mut second).await;

    assert_eq!(mark(&mut first, 2, 2).await.cells[2][2], Some('X'));

    send(&mut second, r#"{"type":"REFRESH"}"#).await;
    assert_eq!(next_state(&mut second).await.cells[2][2], None);
}
