use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use client_core::{
    ControlSurface, EntryStyle, ResultNote, Settings, SurfaceOutcome, NETWORK_ERROR_MESSAGE,
};
use shared::{
    domain::{EntityId, Outcome},
    protocol::{SimulateRequest, SimulateResponse},
};
use tokio::net::TcpListener;

fn display_name(id: &str) -> String {
    match id {
        "tamu" => "Texas A&M",
        "bama" => "Alabama",
        "uga" => "Georgia",
        "miss" => "Ole Miss",
        other => other,
    }
    .to_string()
}

// Stand-in for the evaluation service: every team with a win qualifies.
async fn simulate(
    Json(request): Json<SimulateRequest<BTreeMap<String, String>>>,
) -> Json<SimulateResponse> {
    let teams = request
        .teams
        .iter()
        .filter(|(_, outcome)| outcome.as_str() == Outcome::WIN)
        .map(|(id, _)| display_name(id))
        .collect();
    Json(SimulateResponse::qualified(teams))
}

async fn spawn_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn settings_for(server_url: String) -> Settings {
    Settings {
        server_url,
        ..Settings::default()
    }
}

#[tokio::test]
async fn randomize_then_evaluate_against_live_server() {
    let app = Router::new()
        .route(
            "/randomize",
            get(|| async {
                Json(serde_json::json!({
                    "tamu": "loss", "bama": "win", "uga": "loss", "miss": "win"
                }))
            }),
        )
        .route("/simulate", post(simulate));
    let surface = ControlSurface::connect(&settings_for(spawn_server(app).await)).expect("connect");

    assert_eq!(surface.randomize().await, SurfaceOutcome::Randomized);
    assert_eq!(
        surface.outcome(&EntityId::from("miss")).await,
        Some(Outcome::win())
    );

    let SurfaceOutcome::Evaluated(view) = surface.evaluate().await else {
        panic!("expected rendered result");
    };
    // BTreeMap order on the server side: bama before miss.
    let labels: Vec<_> = view.entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Alabama", "Ole Miss"]);
    assert_eq!(view.entries[1].style, EntryStyle::Keyed("Ole_Miss".into()));
    assert_eq!(view.to_string(), "Alabama vs Ole Miss\n");

    let state = surface.snapshot().await;
    assert!(state.panel.results().is_visible());
    assert!(!state.panel.error().is_visible());
}

#[tokio::test]
async fn toggles_drive_the_evaluated_outcome() {
    let app = Router::new().route("/simulate", post(simulate));
    let surface = ControlSurface::connect(&settings_for(spawn_server(app).await)).expect("connect");

    for id in ["tamu", "bama", "uga", "miss"] {
        assert!(surface.toggle(&EntityId::from(id), &Outcome::loss()).await);
    }

    let SurfaceOutcome::Evaluated(view) = surface.evaluate().await else {
        panic!("expected rendered result");
    };
    assert!(view.entries.is_empty());
    assert_eq!(view.note, Some(ResultNote::NoQualifier));
}

#[tokio::test]
async fn server_failure_surfaces_network_error() {
    let app = Router::new().route(
        "/simulate",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
    );
    let surface = ControlSurface::connect(&settings_for(spawn_server(app).await)).expect("connect");
    let before = surface.snapshot().await.store;

    let outcome = surface.evaluate().await;

    assert_eq!(
        outcome,
        SurfaceOutcome::Failed(NETWORK_ERROR_MESSAGE.to_string())
    );
    let state = surface.snapshot().await;
    assert_eq!(state.store, before);
    assert_eq!(state.panel.visible_error(), Some(NETWORK_ERROR_MESSAGE));
    assert!(state.panel.visible_results().is_none());
}
