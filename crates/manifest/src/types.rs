//! Types for credential manifests, applications, and responses

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ssi_storage::Record;

/// Compact JWS/JWT string, carried opaquely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Jwt(pub String);

impl Jwt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issuer {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDescriptor {
    pub id: String,
    pub schema: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialManifest {
    pub id: String,
    pub spec_version: String,
    pub issuer: Issuer,
    pub output_descriptors: Vec<OutputDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_definition: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialApplication {
    pub id: String,
    pub spec_version: String,
    pub manifest_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_submission: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialResponse {
    pub id: String,
    pub spec_version: String,
    pub manifest_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment: Option<Value>,
}

/// Credential attached to an application or response, either as a JSON
/// object or as a JWT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialContainer {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_jwt: Option<Jwt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredManifest {
    pub id: String,
    pub issuer: String,
    pub manifest: CredentialManifest,
    pub manifest_jwt: Jwt,
}

/// Keyed on the embedded manifest's id.
impl Record for StoredManifest {
    const KIND: &'static str = "manifest";

    fn id(&self) -> &str {
        &self.manifest.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredApplication {
    pub id: String,
    pub manifest_id: String,
    pub applicant_did: String,
    pub application: CredentialApplication,
    #[serde(default)]
    pub credentials: Vec<CredentialContainer>,
    pub application_jwt: Jwt,
}

impl Record for StoredApplication {
    const KIND: &'static str = "application";

    fn id(&self) -> &str {
        &self.application.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResponse {
    pub id: String,
    pub manifest_id: String,
    #[serde(rename = "applicantId")]
    pub applicant_did: String,
    pub response: CredentialResponse,
    #[serde(default)]
    pub credentials: Vec<CredentialContainer>,
    pub response_jwt: Jwt,
}

impl Record for StoredResponse {
    const KIND: &'static str = "response";

    fn id(&self) -> &str {
        &self.response.id
    }
}
