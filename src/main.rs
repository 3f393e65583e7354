use trip_map::args;
use trip_map::camera::CameraTiming;
use trip_map::controller::directions::DirectionsService;
use trip_map::controller::google::GoogleDirections;
use trip_map::controller::http_handlers::{self, AppState};
use trip_map::replay::{parse_script, run_replay};

use actix_web::web::Data;
use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt::try_init();
    let args = args::args_checks()?;

    let directions: Option<Arc<dyn DirectionsService>> = match args.directions_key.clone() {
        Some(key) => Some(Arc::new(GoogleDirections::new(key)?)),
        None => None,
    };
    if directions.is_none() {
        info!("no directions key configured, routes will not be drawn");
    }

    if let Some(path) = &args.replay {
        let steps = parse_script(&std::fs::read_to_string(path)?)?;
        let report = run_replay(
            Arc::clone(&args.itinerary),
            steps,
            directions,
            args.viewport_width,
            CameraTiming::default(),
        )
        .await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let state = AppState::new(
        Arc::clone(&args.itinerary),
        directions,
        args.viewport_width,
        CameraTiming::default(),
    );
    info!(
        title = %args.itinerary.title,
        days = args.itinerary.schedule.len(),
        bind = %args.bind,
        port = args.port,
        "serving itinerary"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(state.clone()))
            .route("/", web::get().to(http_handlers::index))
            .route("/sidebar", web::get().to(http_handlers::sidebar))
            .route("/sidebar/toggle", web::get().to(http_handlers::sidebar_toggle))
            .route("/api/view", web::get().to(http_handlers::view_state))
            .route("/api/schedule", web::get().to(http_handlers::schedule))
            .route("/api/markers", web::get().to(http_handlers::markers))
            .route("/api/route/{day}", web::get().to(http_handlers::day_route))
            .route("/health", web::get().to(http_handlers::health))
    })
    .bind((args.bind.as_str(), args.port))?
    .run()
    .await?;
    Ok(())
}
