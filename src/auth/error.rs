use super::credential::CredentialFault;
use crate::registry::RegistryError;

/// Why a guard refused a request.
///
/// Every variant is terminal for the request. The HTTP mapping lives in
/// `api::error`.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("application key {0}")]
    AppKey(CredentialFault),
    #[error("god key {0}")]
    GodKey(CredentialFault),
    #[error("hub not recognized")]
    IdentityUnknown,
    #[error("hub {hub_uuid} is not a member of project {project_key}")]
    MembershipMismatch { hub_uuid: String, project_key: String },
    #[error("hub registry unavailable: {0}")]
    Registry(#[from] RegistryError),
}
