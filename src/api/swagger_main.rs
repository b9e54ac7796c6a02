use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(info(
    title = "TODO API",
    description = "CRUD over TODO items backed by SQLite"
))]
struct RootApi;

/// Constructs the route on the API that renders the swagger UI and returns the OpenAPI schema.
/// Merges in OpenAPI definitions from the submodules of [api][crate::api]
pub fn build_documentation() -> SwaggerUi {
    let mut api_docs = RootApi::openapi();
    api_docs.merge(super::todo::TodoApi::openapi());
    api_docs.merge(super::health::HealthApi::openapi());

    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_docs)
}
