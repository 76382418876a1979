use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::contract::generate_invite,
        handlers::contract::resolve_invite,
        handlers::contract::contract_details,
        handlers::contract::create_contract,
        handlers::contract::create_plan,
        handlers::contract::create_product,
        handlers::auth::register,
        handlers::auth::login,
        handlers::event::sync_gallery_event,
        handlers::event::delete_event,
        handlers::event::event_detail,
        handlers::event::add_class,
        handlers::event::add_student,
        handlers::event::remove_student,
        handlers::event::delete_class,
        handlers::event::tagging_view,
        handlers::photo::upload_photos,
        handlers::photo::tag_photos,
        handlers::photo::client_gallery,
    ),
    components(
        schemas(
            ApiError,
            MessageResponse,
            PlanResponse,
            ProductResponse,
            ContractDetailsResponse,
            InviteResponse,
            ContractSummary,
            ContractResponse,
            CreateCatalogItemRequest,
            CreateContractRequest,
            RegisterRequest,
            ChildRequest,
            LoginRequest,
            LoginResponse,
            UserResponse,
            SyncGalleryEventRequest,
            CreateClassRequest,
            StudentClassRequest,
            EventResponse,
            ClassResponse,
            StudentResponse,
            EventDetailResponse,
            TaggingStudent,
            TaggedPhoto,
            TaggingViewResponse,
            PhotoResponse,
            TagAction,
            TagPhotosRequest,
            UploadPhotosResponse,
            GalleryResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "contract", description = "Contracts, invites and catalog"),
        (name = "auth", description = "Guardian registration and login"),
        (name = "event", description = "Events, classes and gallery sync"),
        (name = "photo", description = "Photo upload, tagging and client gallery"),
    ),
    info(
        title = "Memory School Backend API",
        version = "1.0.0",
        description = "School photography back office REST API"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
