use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};
use rust_job_scraper::app_state::AppState;
use rust_job_scraper::config::Config;
use rust_job_scraper::{db, scraper};
use serde_json::json;
use std::sync::Mutex;

#[post("/scrape/{function}")]
async fn scrape_jobs(data: web::Data<AppState>, function: web::Path<String>) -> impl Responder {
    let function = function.into_inner();
    let response_function = function.clone();

    // The browser drive is fully blocking, so it runs off the async executor.
    let worker = data.clone();
    let result = web::block(move || {
        let mut conn = worker.db.lock().unwrap();
        scraper::scrape_jobs_by_function(&mut conn, &worker.config, &function)
    })
    .await;

    match result {
        Ok(count) => HttpResponse::Ok().json(json!({
            "function": response_function,
            "jobs_saved": count,
        })),
        Err(e) => {
            error!("Scrape worker failed: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/stats")]
async fn stats(data: web::Data<AppState>) -> impl Responder {
    let conn = data.db.lock().unwrap();
    HttpResponse::Ok().json(json!({
        "total_jobs": db::get_job_count(&conn).unwrap_or(0),
        "total_organizations": db::get_organization_count(&conn).unwrap_or(0),
        "total_tags": db::get_tag_count(&conn).unwrap_or(0),
    }))
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    log4rs::init_file("log4rs.yml", Default::default()).unwrap();

    let cfg = Config::load();

    let conn = db::init_db(&cfg.db_path).unwrap();
    db::create_tables(&conn).unwrap();

    let bind_addr = cfg.bind_addr.clone();
    let data = web::Data::new(AppState {
        db: Mutex::new(conn),
        config: cfg,
    });

    info!("Listening on {}", bind_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .service(scrape_jobs)
            .service(stats)
            .service(health)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
