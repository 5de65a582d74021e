//! OpenAPI document served at `/api-docs/openapi.json` and rendered at `/docs`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;
use crate::models::{
    AthletesRightsLead, AuthErrorResponse, CreateAthletesRightsLead, CreateRetiredLead,
    MessageResponse, RetiredLead,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Registro de leads - ZNS Advogados",
        description = "Registro de leads de aposentadoria e direito dos atletas"
    ),
    paths(
        handlers::health,
        handlers::create_retired_lead,
        handlers::get_retired_lead,
        handlers::create_athletes_rights_lead,
        handlers::get_athletes_rights_lead,
    ),
    components(schemas(
        RetiredLead,
        AthletesRightsLead,
        CreateRetiredLead,
        CreateAthletesRightsLead,
        MessageResponse,
        AuthErrorResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "Health", description = "Liveness check"),
        (name = "Leads - Aposentadoria", description = "Leads de aposentadoria"),
        (name = "Leads - Direito dos Atletas", description = "Leads de direito dos atletas"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` scheme referenced by the lead endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_lead_paths() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "Registro de leads - ZNS Advogados");
        for path in [
            "/health",
            "/retired",
            "/retired/{id}",
            "/api/athletes-rights",
            "/api/athletes-rights/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
        assert!(components.schemas.contains_key("RetiredLead"));
    }
}
