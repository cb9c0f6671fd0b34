use super::{urlencoded, Protocol, SasPermissions};
use cloudsig_core::hash;
use cloudsig_core::time::{format_rfc3339, DateTime};
use cloudsig_core::Result;

/// The service SAS string-to-sign layout below matches this version.
/// https://learn.microsoft.com/en-us/rest/api/storageservices/create-service-sas
const SERVICE_SAS_VERSION: &str = "2018-11-09";
const SERVICE_SAS_PERMISSIONS: &str = "r";

/// The resource a service level SAS is scoped to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SasResource {
    /// A whole container.
    Container,
    /// One blob.
    Blob,
}

impl SasResource {
    fn signed(&self) -> &'static str {
        match self {
            SasResource::Container => "c",
            SasResource::Blob => "b",
        }
    }
}

/// Service (container/blob) level Shared Access Signature generator.
pub struct BlobSharedAccessSignature {
    account: String,
    key: String,
    container: String,
    blob: Option<String>,
    version: String,
    permissions: String,
    expiry: DateTime,
    start: Option<DateTime>,
    identifier: Option<String>,
    ip: Option<String>,
    protocol: Option<Protocol>,
}

impl BlobSharedAccessSignature {
    /// Create a SAS signer scoped to one container.
    pub fn new(account: String, key: String, container: String, expiry: DateTime) -> Self {
        Self {
            account,
            key,
            container,
            blob: None,
            expiry,
            start: None,
            identifier: None,
            ip: None,
            protocol: None,
            version: SERVICE_SAS_VERSION.to_string(),
            permissions: SERVICE_SAS_PERMISSIONS.to_string(),
        }
    }

    /// Narrow the scope from the container to one blob.
    pub fn with_blob(mut self, blob: &str) -> Self {
        self.blob = Some(blob.to_string());
        self
    }

    /// Grant a different permission set than the default read-only one.
    ///
    /// Validated and canonicalized when the token is generated.
    pub fn with_permissions(mut self, permissions: &str) -> Self {
        self.permissions = permissions.to_string();
        self
    }

    /// Set the start of the validity window.
    pub fn with_start(mut self, start: DateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Reference a stored access policy by identifier.
    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.identifier = Some(identifier.to_string());
        self
    }

    /// Restrict the SAS to an IP or IP range.
    pub fn with_ip(mut self, ip: &str) -> Self {
        self.ip = Some(ip.to_string());
        self
    }

    /// Restrict the protocol the SAS may be presented over.
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    fn resource(&self) -> SasResource {
        match self.blob {
            Some(_) => SasResource::Blob,
            None => SasResource::Container,
        }
    }

    fn canonicalized_resource(&self) -> String {
        let mut resource = format!("/blob/{}/{}", self.account, self.container);
        if let Some(blob) = &self.blob {
            resource.push('/');
            resource.push_str(blob);
        }
        resource
    }

    // Azure documentation: https://learn.microsoft.com/en-us/rest/api/storageservices/create-service-sas#construct-the-signature-string
    //
    // The trailing snapshot and response-header override fields stay empty;
    // they still participate in the signed text.
    fn signature(&self, permissions: &SasPermissions) -> Result<String> {
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n\n\n\n\n\n",
            permissions,
            self.start.as_ref().map_or(String::new(), |v| format_rfc3339(*v)),
            format_rfc3339(self.expiry),
            self.canonicalized_resource(),
            self.identifier.clone().unwrap_or_default(),
            self.ip.clone().unwrap_or_default(),
            self.protocol.as_ref().map_or(String::new(), |v| v.to_string()),
            self.version,
            self.resource().signed(),
        );

        let decoded_key = hash::base64_decode(self.key.as_str())?;

        Ok(hash::base64_hmac_sha256(
            &decoded_key,
            string_to_sign.as_bytes(),
        ))
    }

    /// Generate the SAS query pairs, `sig` last.
    pub fn token(&self) -> Result<Vec<(String, String)>> {
        let permissions = SasPermissions::service(&self.permissions)?;

        let mut elements: Vec<(String, String)> = vec![
            ("sv".to_string(), self.version.clone()),
            ("sr".to_string(), self.resource().signed().to_string()),
            (
                "se".to_string(),
                urlencoded(format_rfc3339(self.expiry)),
            ),
            ("sp".to_string(), permissions.to_string()),
        ];

        if let Some(start) = &self.start {
            elements.push(("st".to_string(), urlencoded(format_rfc3339(*start))))
        }
        if let Some(identifier) = &self.identifier {
            elements.push(("si".to_string(), identifier.clone()))
        }
        if let Some(ip) = &self.ip {
            elements.push(("sip".to_string(), ip.to_string()))
        }
        if let Some(protocol) = &self.protocol {
            elements.push(("spr".to_string(), protocol.to_string()))
        }

        let sig = self.signature(&permissions)?;
        elements.push(("sig".to_string(), urlencoded(sig)));

        Ok(elements)
    }
}
