use serde::{Deserialize, Serialize};

/// Connection settings for the signaling client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalingConfig {
    /// Secure WebSocket endpoint of the SIP server.
    pub transport_endpoint: String,
    /// SIP URI this client registers as.
    pub identity_uri: String,
    pub credential_secret: String,
    pub display_name: String,
    pub register_on_start: bool,
}

impl Default for SignalingConfig {
    fn default() -> Self {
        Self {
            transport_endpoint: "wss://192.168.1.11:8443/ws".to_string(),
            identity_uri: "sip:9001@192.168.1.11".to_string(),
            credential_secret: "1234".to_string(),
            display_name: "WebRTC Client".to_string(),
            register_on_start: true,
        }
    }
}

impl SignalingConfig {
    /// Host part of the identity URI; dialed extensions live on the same
    /// server.
    pub fn sip_domain(&self) -> &str {
        self.identity_uri
            .rsplit('@')
            .next()
            .unwrap_or(&self.identity_uri)
    }

    pub fn dial_uri(&self, target: &str) -> String {
        format!("sip:{}@{}", target, self.sip_domain())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_deployment() {
        let config = SignalingConfig::default();
        assert_eq!(config.transport_endpoint, "wss://192.168.1.11:8443/ws");
        assert_eq!(config.identity_uri, "sip:9001@192.168.1.11");
        assert!(config.register_on_start);
    }

    #[test]
    fn dial_uri_targets_the_identity_domain() {
        let config = SignalingConfig::default();
        assert_eq!(config.dial_uri("9008"), "sip:9008@192.168.1.11");
    }
}
