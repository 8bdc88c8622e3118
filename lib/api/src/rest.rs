use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use dinewise_core::{Error, PlaceId};
use dinewise_engine::{BrowseFilter, RecommendRequest, Recommender};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
struct BrowseRequest {
    #[serde(flatten)]
    filter: BrowseFilter,
    top_n: Option<usize>,
}

#[derive(Serialize)]
struct ClusterInfo {
    place_id: PlaceId,
    location_cluster: i32,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(recommender: Arc<Recommender>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(recommender.clone()))
                .configure(routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Route table, shared by the server and handler tests
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/recommendations", web::post().to(recommend))
        .route("/cuisines", web::get().to(cuisines))
        .route("/restaurants/{id}/cluster", web::get().to(restaurant_cluster))
        .route("/browse", web::post().to(browse))
        .route("/stats", web::get().to(stats));
}

fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        Error::UserNotFound(_) => HttpResponse::NotFound().json(body),
        Error::InvalidParameter(_) => HttpResponse::BadRequest().json(body),
        _ => {
            tracing::error!(error = %e, "Request failed");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    })))
}

async fn recommend(
    recommender: web::Data<Arc<Recommender>>,
    req: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    match recommender.recommend_explained(&req) {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn cuisines(recommender: web::Data<Arc<Recommender>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": recommender.cuisine_vocabulary()
    })))
}

async fn restaurant_cluster(
    recommender: web::Data<Arc<Recommender>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let place_id = PlaceId::new(path.into_inner());

    match recommender.cluster_of(&place_id) {
        Some(location_cluster) => Ok(HttpResponse::Ok().json(ClusterInfo {
            place_id,
            location_cluster,
        })),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Restaurant not found"
        }))),
    }
}

async fn browse(
    recommender: web::Data<Arc<Recommender>>,
    req: web::Json<BrowseRequest>,
) -> ActixResult<HttpResponse> {
    match recommender.browse(&req.filter, req.top_n) {
        Ok(result) => Ok(HttpResponse::Ok().json(serde_json::json!({ "result": result }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn stats(recommender: web::Data<Arc<Recommender>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(recommender.stats()))
}
