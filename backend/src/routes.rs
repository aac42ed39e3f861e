use actix_multipart::Multipart;
use actix_web::{web, Error, HttpResponse};
use futures::{StreamExt, TryStreamExt};
use log::{error, info, warn};
use serde_json::json;
use shared::{AnalyzeRequest, ErrorResponse, UploadResponse};
use std::io::Write;

use crate::analysis::analysis_service::AnalysisService;
use crate::storage::fs_service::FsStorageService;
use crate::validation::{validate_upload, ValidationError};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/upload").route(web::post().to(upload_image)))
        .service(web::resource("/analyze").route(web::post().to(analyze_image)))
        .service(web::resource("/image/{image_id}").route(web::get().to(get_image_info)))
        .service(web::resource("/").route(web::get().to(root)))
        .service(web::resource("/health").route(web::get().to(health_check)));
}

fn validation_error_response(rejection: &ValidationError) -> HttpResponse {
    let mut response = match rejection {
        ValidationError::FileTooLarge { .. } => HttpResponse::PayloadTooLarge(),
        _ => HttpResponse::BadRequest(),
    };
    response.json(ErrorResponse {
        error: rejection.error_code().to_string(),
        message: rejection.to_string(),
    })
}

fn internal_error_response() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "internal_error".to_string(),
        message: "Internal server error".to_string(),
    })
}

async fn upload_image(
    storage: web::Data<FsStorageService>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    let mut upload: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let filename = {
            let Some(disposition) = field.content_disposition() else {
                continue;
            };
            if disposition.get_name() != Some("file") {
                continue;
            }
            disposition
                .get_filename()
                .unwrap_or_default()
                .to_string()
        };
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut contents = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk?;
            contents.write_all(&data)?;
        }

        upload = Some((filename, content_type, contents));
        break;
    }

    // No file field at all is indistinguishable from a nameless one.
    let Some((filename, content_type, contents)) = upload else {
        let rejection = ValidationError::MissingFilename;
        warn!("Upload rejected: {}", rejection);
        return Ok(validation_error_response(&rejection));
    };

    info!(
        "Upload request received: filename={}, content_type={}",
        filename,
        content_type.as_deref().unwrap_or("none")
    );

    let extension = match validate_upload(&filename, content_type.as_deref(), contents.len()) {
        Ok(extension) => extension,
        Err(rejection) => {
            warn!("Upload rejected: {}", rejection);
            return Ok(validation_error_response(&rejection));
        }
    };

    let image_id = FsStorageService::generate_image_id();
    if let Err(e) = storage.save_image(&image_id, &contents, &extension).await {
        error!("Failed to persist upload {}: {}", image_id, e);
        return Ok(internal_error_response());
    }

    info!("Image uploaded successfully: image_id={}", image_id);

    Ok(HttpResponse::Created().json(UploadResponse {
        image_id,
        message: "Image uploaded successfully".to_string(),
    }))
}

async fn analyze_image(
    storage: web::Data<FsStorageService>,
    analysis: web::Data<AnalysisService>,
    request: web::Json<AnalyzeRequest>,
) -> HttpResponse {
    let image_id = &request.image_id;
    info!(
        "Analysis request received: image_id={}, detailed={}",
        image_id, request.detailed
    );

    let image = match storage.image_info(image_id).await {
        Ok(Some(image)) => image,
        Ok(None) => {
            warn!("Image not found: {}", image_id);
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "image_not_found".to_string(),
                message: format!(
                    "No image found with ID '{}'. Please upload an image first using the /upload endpoint.",
                    image_id
                ),
            });
        }
        Err(e) => {
            error!("Failed to stat image {}: {}", image_id, e);
            return internal_error_response();
        }
    };

    if request.detailed {
        let result = analysis.analyze_detailed(image_id, image.size_bytes, &image.extension);
        HttpResponse::Ok().json(result)
    } else {
        let result = analysis.analyze(image_id, image.size_bytes, &image.extension);
        HttpResponse::Ok().json(result)
    }
}

async fn get_image_info(
    storage: web::Data<FsStorageService>,
    path: web::Path<String>,
) -> HttpResponse {
    let image_id = path.into_inner();

    match storage.image_info(&image_id).await {
        Ok(Some(image)) => HttpResponse::Ok().json(image),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse {
            error: "image_not_found".to_string(),
            message: format!("No image found with ID '{}'", image_id),
        }),
        Err(e) => {
            error!("Failed to stat image {}: {}", image_id, e);
            internal_error_response()
        }
    }
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "message": "Image Analysis API is running"
    }))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "image-analysis-api",
        "version": "1.0.0"
    }))
}
