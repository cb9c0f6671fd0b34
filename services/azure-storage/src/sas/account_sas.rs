use super::{urlencoded, Protocol, SasPermissions};
use cloudsig_core::hash;
use cloudsig_core::time::{format_rfc3339, DateTime};
use cloudsig_core::Result;

/// The default parameters that make up an account SAS token.
/// https://learn.microsoft.com/en-us/rest/api/storageservices/create-account-sas#specify-the-account-sas-parameters
const ACCOUNT_SAS_VERSION: &str = "2018-11-09";
const ACCOUNT_SAS_RESOURCE: &str = "bqtf";
const ACCOUNT_SAS_RESOURCE_TYPE: &str = "sco";
const ACCOUNT_SAS_PERMISSIONS: &str = "rwdlacu";

/// Account level Shared Access Signature generator.
pub struct AccountSharedAccessSignature {
    account: String,
    key: String,
    version: String,
    resource: String,
    resource_type: String,
    permissions: String,
    expiry: DateTime,
    start: Option<DateTime>,
    ip: Option<String>,
    protocol: Option<Protocol>,
}

impl AccountSharedAccessSignature {
    /// Create a SAS token signer with default parameters.
    pub fn new(account: String, key: String, expiry: DateTime) -> Self {
        Self {
            account,
            key,
            expiry,
            start: None,
            ip: None,
            protocol: None,
            version: ACCOUNT_SAS_VERSION.to_string(),
            resource: ACCOUNT_SAS_RESOURCE.to_string(),
            resource_type: ACCOUNT_SAS_RESOURCE_TYPE.to_string(),
            permissions: ACCOUNT_SAS_PERMISSIONS.to_string(),
        }
    }

    /// Grant a different permission set than the default.
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

    // Azure documentation: https://learn.microsoft.com/en-us/rest/api/storageservices/create-account-sas#construct-the-signature-string
    fn signature(&self, permissions: &SasPermissions) -> Result<String> {
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n",
            self.account,
            permissions,
            self.resource,
            self.resource_type,
            self.start.as_ref().map_or(String::new(), |v| format_rfc3339(*v)),
            format_rfc3339(self.expiry),
            self.ip.clone().unwrap_or_default(),
            self.protocol.as_ref().map_or(String::new(), |v| v.to_string()),
            self.version,
        );

        let decoded_key = hash::base64_decode(self.key.as_str())?;

        Ok(hash::base64_hmac_sha256(
            &decoded_key,
            string_to_sign.as_bytes(),
        ))
    }

    /// Generate the SAS query pairs, `sig` last.
    ///
    /// [Example](https://docs.microsoft.com/rest/api/storageservices/create-service-sas#service-sas-example) from Azure documentation.
    pub fn token(&self) -> Result<Vec<(String, String)>> {
        let permissions = SasPermissions::account(&self.permissions)?;

        let mut elements: Vec<(String, String)> = vec![
            ("sv".to_string(), self.version.clone()),
            ("ss".to_string(), self.resource.clone()),
            ("srt".to_string(), self.resource_type.clone()),
            (
                "se".to_string(),
                urlencoded(format_rfc3339(self.expiry)),
            ),
            ("sp".to_string(), permissions.to_string()),
        ];

        if let Some(start) = &self.start {
            elements.push(("st".to_string(), urlencoded(format_rfc3339(*start))))
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

#[cfg(test)]
mod tests {
    use super::*;
    use cloudsig_core::time::parse_rfc3339;

    fn test_time() -> DateTime {
        parse_rfc3339("2022-03-01T08:12:34Z").unwrap()
    }

    fn token_string(sign: &AccountSharedAccessSignature) -> String {
        sign.token()
            .expect("token must be generated")
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<String>>()
            .join("&")
    }

    #[test]
    fn test_can_generate_sas_token() {
        let key = hash::base64_encode("key".as_bytes());
        let expiry = test_time() + chrono::TimeDelta::try_minutes(5).unwrap();
        let sign = AccountSharedAccessSignature::new("account".to_string(), key, expiry);

        assert_eq!(token_string(&sign), "sv=2018-11-09&ss=bqtf&srt=sco&se=2022-03-01T08%3A17%3A34Z&sp=rwdlacu&sig=jgK9nDUT0ntH%2Fp28LPs0jzwxsk91W6hePLPlfrElv4k%3D");
    }

    #[test]
    fn test_permissions_are_normalized_before_signing() {
        let key = hash::base64_encode("key".as_bytes());
        let expiry = test_time() + chrono::TimeDelta::try_minutes(5).unwrap();

        let canonical = AccountSharedAccessSignature::new("account".to_string(), key.clone(), expiry)
            .with_permissions("rwdlacu");
        let scrambled = AccountSharedAccessSignature::new("account".to_string(), key, expiry)
            .with_permissions("ucaldwr");

        // Same set, same signature, regardless of caller spelling.
        assert_eq!(token_string(&canonical), token_string(&scrambled));
    }

    #[test]
    fn test_malformed_permissions_are_rejected() {
        let key = hash::base64_encode("key".as_bytes());
        let sign = AccountSharedAccessSignature::new("account".to_string(), key, test_time())
            .with_permissions("rwz");

        assert!(sign.token().is_err());
    }

    #[test]
    fn test_optional_fields_appear_in_token() {
        let key = hash::base64_encode("key".as_bytes());
        let expiry = test_time() + chrono::TimeDelta::try_minutes(5).unwrap();
        let sign = AccountSharedAccessSignature::new("account".to_string(), key, expiry)
            .with_start(test_time())
            .with_ip("168.1.5.60-168.1.5.70")
            .with_protocol(Protocol::Https);

        let token = sign.token().expect("token must be generated");
        let keys: Vec<&str> = token.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["sv", "ss", "srt", "se", "sp", "st", "sip", "spr", "sig"]);
    }
}
