use utoipa::OpenApi;

/// Aggregated OpenAPI documentation for the application.
///
/// Domain APIs are nested under the same paths the router uses, so the
/// documentation matches what is actually served.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "todoops API",
        description = "Task tracking backend with a constrained status workflow"
    ),
    nest(
        (path = "/api/v1/tasks", api = domain_tasks::ApiDoc)
    )
)]
pub struct ApiDoc;
