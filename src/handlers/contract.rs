use crate::models::*;
use crate::services::ContractService;
use actix_web::{HttpResponse, ResponseError, Result, http::header, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/contrato/{contract_id}/gerar-convite",
    tag = "contract",
    params(("contract_id" = String, Path, description = "Contract id")),
    responses(
        (status = 200, description = "Invite link generated", body = InviteResponse),
        (status = 404, description = "Contract not found", body = ApiError)
    )
)]
pub async fn generate_invite(
    contract_service: web::Data<ContractService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match contract_service.generate_invite(&path.into_inner()).await {
        Ok(invite) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": invite.message,
            "invite_link": invite.invite_link
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/convite/{token}",
    tag = "contract",
    params(("token" = String, Path, description = "Invite token")),
    responses(
        (status = 302, description = "Redirect to the registration page"),
        (status = 404, description = "Invalid or expired invite link")
    )
)]
pub async fn resolve_invite(
    contract_service: web::Data<ContractService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match contract_service.registration_link(&path.into_inner()).await {
        Ok(link) => Ok(HttpResponse::Found()
            .append_header((header::LOCATION, link))
            .finish()),
        Err(e) => {
            log::info!("Invite lookup failed: {e}");
            Ok(HttpResponse::NotFound()
                .content_type("text/plain; charset=utf-8")
                .body("Invalid or expired invite link."))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/contract-details/{token}",
    tag = "contract",
    params(("token" = String, Path, description = "Invite token")),
    responses(
        (status = 200, description = "Contract with its plans and products", body = ContractDetailsResponse),
        (status = 404, description = "Invalid or expired invite link", body = ApiError)
    )
)]
pub async fn contract_details(
    contract_service: web::Data<ContractService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match contract_service.contract_details(&path.into_inner()).await {
        Ok(details) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "id": details.id,
            "name": details.name,
            "plans": details.plans,
            "products": details.products
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/contratos",
    tag = "contract",
    request_body = CreateContractRequest,
    responses(
        (status = 201, description = "Contract created", body = ContractResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 409, description = "Contract id already in use", body = ApiError)
    )
)]
pub async fn create_contract(
    contract_service: web::Data<ContractService>,
    request: web::Json<CreateContractRequest>,
) -> Result<HttpResponse> {
    match contract_service.create_contract(request.into_inner()).await {
        Ok(contract) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": contract
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/planos",
    tag = "contract",
    request_body = CreateCatalogItemRequest,
    responses(
        (status = 201, description = "Plan created", body = PlanResponse),
        (status = 400, description = "Invalid request", body = ApiError)
    )
)]
pub async fn create_plan(
    contract_service: web::Data<ContractService>,
    request: web::Json<CreateCatalogItemRequest>,
) -> Result<HttpResponse> {
    match contract_service.create_plan(request.into_inner()).await {
        Ok(plan) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": plan
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/produtos",
    tag = "contract",
    request_body = CreateCatalogItemRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid request", body = ApiError)
    )
)]
pub async fn create_product(
    contract_service: web::Data<ContractService>,
    request: web::Json<CreateCatalogItemRequest>,
) -> Result<HttpResponse> {
    match contract_service.create_product(request.into_inner()).await {
        Ok(product) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": product
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn contract_config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/admin/contrato/{contract_id}/gerar-convite",
        web::post().to(generate_invite),
    )
    .route("/admin/contratos", web::post().to(create_contract))
    .route("/admin/planos", web::post().to(create_plan))
    .route("/admin/produtos", web::post().to(create_product))
    .route("/convite/{token}", web::get().to(resolve_invite))
    .route("/api/contract-details/{token}", web::get().to(contract_details));
}
