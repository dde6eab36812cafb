// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display, user messages, From impls
// ═══════════════════════════════════════════════════════════════════

use fundscope_core::errors::{CoreError, FieldError, LOGIN_REQUIRED_MESSAGE};

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_file_format() {
        let err = CoreError::InvalidFileFormat("bad header".into());
        assert_eq!(err.to_string(), "Invalid file format: bad header");
    }

    #[test]
    fn unsupported_version() {
        assert_eq!(CoreError::UnsupportedVersion(99).to_string(), "Unsupported file version: 99");
    }

    #[test]
    fn decryption() {
        assert_eq!(
            CoreError::Decryption.to_string(),
            "Decryption failed — wrong password or corrupted file"
        );
    }

    #[test]
    fn not_found() {
        let err = CoreError::NotFound("api/funds/42".into());
        assert_eq!(err.to_string(), "Not found: api/funds/42");
    }

    #[test]
    fn server() {
        let err = CoreError::Server {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "Server error (503): Service Unavailable");
    }

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            endpoint: "api/goals".into(),
            message: "Goal limit reached".into(),
        };
        assert_eq!(err.to_string(), "API error (api/goals): Goal limit reached");
    }

    #[test]
    fn kyc_validation_joins_fields() {
        let err = CoreError::KycValidation(vec![
            FieldError::new("pan", "Invalid PAN format"),
            FieldError::new("phone", "Invalid mobile number"),
        ]);
        assert_eq!(
            err.to_string(),
            "KYC validation failed: pan: Invalid PAN format; phone: Invalid mobile number"
        );
    }

    #[test]
    fn selection_full() {
        assert_eq!(
            CoreError::SelectionFull(4).to_string(),
            "Compare selection is full (max 4 funds)"
        );
    }

    #[test]
    fn holdings_unavailable() {
        assert_eq!(
            CoreError::HoldingsUnavailable("F1".into()).to_string(),
            "Holdings data not available for fund F1"
        );
    }

    #[test]
    fn goal_not_found() {
        assert_eq!(CoreError::GoalNotFound("g-1".into()).to_string(), "Goal not found: g-1");
    }

    #[test]
    fn timeout() {
        assert_eq!(CoreError::Timeout.to_string(), "Request timed out");
    }
}

// ── User-facing messages ────────────────────────────────────────────

mod user_message {
    use super::*;

    #[test]
    fn unauthorized_asks_for_login() {
        assert_eq!(CoreError::Unauthorized.user_message(), LOGIN_REQUIRED_MESSAGE);
        assert_eq!(LOGIN_REQUIRED_MESSAGE, "Please login to continue");
    }

    #[test]
    fn server_errors_are_generic() {
        let err = CoreError::Server {
            status: 500,
            message: "stack trace here".into(),
        };
        assert!(!err.user_message().contains("stack trace"));
        assert!(err.user_message().contains("try again"));
    }

    #[test]
    fn network_errors_mention_connection() {
        assert!(CoreError::Timeout.user_message().contains("connection"));
        assert!(CoreError::Network("dns".into()).user_message().contains("connection"));
    }

    #[test]
    fn validation_passes_message_through() {
        let err = CoreError::ValidationError("Amount must be at least ₹500".into());
        assert_eq!(err.user_message(), "Amount must be at least ₹500");
    }

    #[test]
    fn api_passes_backend_message_through() {
        let err = CoreError::Api {
            endpoint: "api/investments".into(),
            message: "Market closed".into(),
        };
        assert_eq!(err.user_message(), "Market closed");
    }

    #[test]
    fn only_unauthorized_is_auth_error() {
        assert!(CoreError::Unauthorized.is_auth_error());
        assert!(!CoreError::NotFound("x".into()).is_auth_error());
        assert!(!CoreError::Http {
            status: 403,
            message: "Forbidden".into()
        }
        .is_auth_error());
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(ref m) if m.contains("no such file")));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_bincode_error() {
        let bin_err = bincode::deserialize::<String>(&[255]).unwrap_err();
        let err: CoreError = bin_err.into();
        assert!(matches!(err, CoreError::Serialization(_)));
    }

    #[test]
    fn from_aes_gcm_error() {
        let err: CoreError = aes_gcm::Error.into();
        assert!(matches!(err, CoreError::Decryption));
    }
}

// ── std::error::Error ───────────────────────────────────────────────

mod std_error {
    use super::*;

    #[test]
    fn core_error_implements_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::Timeout);
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn core_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }

    #[test]
    fn field_error_display() {
        assert_eq!(
            FieldError::new("bank.ifsc", "Invalid IFSC code").to_string(),
            "bank.ifsc: Invalid IFSC code"
        );
    }
}
