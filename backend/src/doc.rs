//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the barcode lookup and health paths, the schema
//! wrappers that describe domain types without coupling them to utoipa, and
//! the bearer token security scheme. Swagger UI serves it in debug builds.

use crate::inbound::http::barcode::{BarcodeLookupRequest, BarcodeLookupResponse};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, ProductDetailsSchema, ProductSourceSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by the hosted auth service."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "PawDesk API",
        description = "Barcode lookup for inventory intake, plus health probes.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::barcode::lookup_barcode,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        BarcodeLookupRequest,
        BarcodeLookupResponse,
        ProductDetailsSchema,
        ProductSourceSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "inventory", description = "Product intake helpers"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use super::*;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const PRODUCT_SCHEMA_NAME: &str = "crate.domain.ProductDetails";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_registers_domain_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;

        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");
        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");

        let product_schema = schemas.get(PRODUCT_SCHEMA_NAME).expect("Product schema");
        assert_object_schema_has_field(product_schema, "barcode");
        assert_object_schema_has_field(product_schema, "source");
    }

    #[test]
    fn openapi_documents_barcode_lookup_with_bearer_auth() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/barcode-lookup"));
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key("BearerAuth"));
    }
}
