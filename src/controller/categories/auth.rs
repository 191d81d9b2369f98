//! # Auth Configuration
//!
//! GoTrue settings (`/config/auth`). The endpoint accepts provider secrets,
//! SMTP credentials and hook secrets on write but always returns them empty,
//! so they are listed in [`AUTH_SENSITIVE_FIELDS`] and restored from the last
//! local declaration after every read and write.

use super::Category;
use crate::model::{settings_document, ConfigCategory};

/// Write-only auth fields
pub static AUTH_SENSITIVE_FIELDS: [&str; 32] = [
    "smtp_pass",
    "sms_twilio_auth_token",
    "sms_twilio_verify_auth_token",
    "sms_messagebird_access_key",
    "sms_textlocal_api_key",
    "sms_vonage_api_secret",
    "security_captcha_secret",
    "external_apple_secret",
    "external_azure_secret",
    "external_bitbucket_secret",
    "external_discord_secret",
    "external_facebook_secret",
    "external_figma_secret",
    "external_github_secret",
    "external_gitlab_secret",
    "external_google_secret",
    "external_kakao_secret",
    "external_keycloak_secret",
    "external_linkedin_oidc_secret",
    "external_notion_secret",
    "external_slack_oidc_secret",
    "external_slack_secret",
    "external_spotify_secret",
    "external_twitch_secret",
    "external_twitter_secret",
    "external_workos_secret",
    "external_zoom_secret",
    "hook_custom_access_token_secrets",
    "hook_mfa_verification_attempt_secrets",
    "hook_password_verification_attempt_secrets",
    "hook_send_email_secrets",
    "hook_send_sms_secrets",
];

settings_document! {
    /// Auth service settings
    pub struct AuthSettings sensitive = AUTH_SENSITIVE_FIELDS {
        site_url as "site_url": String,
        uri_allow_list as "uri_allow_list": String,
        jwt_exp as "jwt_exp": i64,
        disable_signup as "disable_signup": bool,
        external_anonymous_users_enabled as "external_anonymous_users_enabled": bool,
        external_email_enabled as "external_email_enabled": bool,
        external_phone_enabled as "external_phone_enabled": bool,
        mailer_autoconfirm as "mailer_autoconfirm": bool,
        mailer_secure_email_change_enabled as "mailer_secure_email_change_enabled": bool,
        mailer_otp_exp as "mailer_otp_exp": i64,
        mailer_otp_length as "mailer_otp_length": i64,
        mailer_subjects_confirmation as "mailer_subjects_confirmation": String,
        mailer_templates_confirmation_content as "mailer_templates_confirmation_content": String,
        password_min_length as "password_min_length": i64,
        password_required_characters as "password_required_characters": String,
        password_hibp_enabled as "password_hibp_enabled": bool,
        refresh_token_rotation_enabled as "refresh_token_rotation_enabled": bool,
        security_refresh_token_reuse_interval as "security_refresh_token_reuse_interval": i64,
        security_captcha_enabled as "security_captcha_enabled": bool,
        security_captcha_provider as "security_captcha_provider": String,
        security_manual_linking_enabled as "security_manual_linking_enabled": bool,
        sessions_timebox as "sessions_timebox": i64,
        sessions_inactivity_timeout as "sessions_inactivity_timeout": i64,
        sessions_single_per_user as "sessions_single_per_user": bool,
        smtp_admin_email as "smtp_admin_email": String,
        smtp_host as "smtp_host": String,
        smtp_port as "smtp_port": String,
        smtp_user as "smtp_user": String,
        smtp_sender_name as "smtp_sender_name": String,
        smtp_max_frequency as "smtp_max_frequency": i64,
        sms_provider as "sms_provider": String,
        sms_autoconfirm as "sms_autoconfirm": bool,
        sms_otp_exp as "sms_otp_exp": i64,
        sms_otp_length as "sms_otp_length": i64,
        sms_template as "sms_template": String,
        sms_twilio_account_sid as "sms_twilio_account_sid": String,
        sms_twilio_message_service_sid as "sms_twilio_message_service_sid": String,
        sms_twilio_content_sid as "sms_twilio_content_sid": String,
        sms_twilio_verify_account_sid as "sms_twilio_verify_account_sid": String,
        sms_twilio_verify_message_service_sid as "sms_twilio_verify_message_service_sid": String,
        sms_messagebird_originator as "sms_messagebird_originator": String,
        sms_textlocal_sender as "sms_textlocal_sender": String,
        sms_vonage_api_key as "sms_vonage_api_key": String,
        sms_vonage_from as "sms_vonage_from": String,
        mfa_max_enrolled_factors as "mfa_max_enrolled_factors": i64,
        mfa_totp_enroll_enabled as "mfa_totp_enroll_enabled": bool,
        mfa_totp_verify_enabled as "mfa_totp_verify_enabled": bool,
        mfa_phone_enroll_enabled as "mfa_phone_enroll_enabled": bool,
        mfa_phone_verify_enabled as "mfa_phone_verify_enabled": bool,
        rate_limit_anonymous_users as "rate_limit_anonymous_users": i64,
        rate_limit_email_sent as "rate_limit_email_sent": i64,
        rate_limit_sms_sent as "rate_limit_sms_sent": i64,
        rate_limit_verify as "rate_limit_verify": i64,
        rate_limit_token_refresh as "rate_limit_token_refresh": i64,
        rate_limit_otp as "rate_limit_otp": i64,
        external_apple_enabled as "external_apple_enabled": bool,
        external_apple_client_id as "external_apple_client_id": String,
        external_azure_enabled as "external_azure_enabled": bool,
        external_azure_client_id as "external_azure_client_id": String,
        external_bitbucket_enabled as "external_bitbucket_enabled": bool,
        external_bitbucket_client_id as "external_bitbucket_client_id": String,
        external_discord_enabled as "external_discord_enabled": bool,
        external_discord_client_id as "external_discord_client_id": String,
        external_facebook_enabled as "external_facebook_enabled": bool,
        external_facebook_client_id as "external_facebook_client_id": String,
        external_figma_enabled as "external_figma_enabled": bool,
        external_figma_client_id as "external_figma_client_id": String,
        external_github_enabled as "external_github_enabled": bool,
        external_github_client_id as "external_github_client_id": String,
        external_gitlab_enabled as "external_gitlab_enabled": bool,
        external_gitlab_client_id as "external_gitlab_client_id": String,
        external_google_enabled as "external_google_enabled": bool,
        external_google_client_id as "external_google_client_id": String,
        external_kakao_enabled as "external_kakao_enabled": bool,
        external_kakao_client_id as "external_kakao_client_id": String,
        external_keycloak_enabled as "external_keycloak_enabled": bool,
        external_keycloak_client_id as "external_keycloak_client_id": String,
        external_linkedin_oidc_enabled as "external_linkedin_oidc_enabled": bool,
        external_linkedin_oidc_client_id as "external_linkedin_oidc_client_id": String,
        external_notion_enabled as "external_notion_enabled": bool,
        external_notion_client_id as "external_notion_client_id": String,
        external_slack_oidc_enabled as "external_slack_oidc_enabled": bool,
        external_slack_oidc_client_id as "external_slack_oidc_client_id": String,
        external_slack_enabled as "external_slack_enabled": bool,
        external_slack_client_id as "external_slack_client_id": String,
        external_spotify_enabled as "external_spotify_enabled": bool,
        external_spotify_client_id as "external_spotify_client_id": String,
        external_twitch_enabled as "external_twitch_enabled": bool,
        external_twitch_client_id as "external_twitch_client_id": String,
        external_twitter_enabled as "external_twitter_enabled": bool,
        external_twitter_client_id as "external_twitter_client_id": String,
        external_workos_enabled as "external_workos_enabled": bool,
        external_workos_client_id as "external_workos_client_id": String,
        external_zoom_enabled as "external_zoom_enabled": bool,
        external_zoom_client_id as "external_zoom_client_id": String,
        external_azure_url as "external_azure_url": String,
        external_gitlab_url as "external_gitlab_url": String,
        external_keycloak_url as "external_keycloak_url": String,
        external_workos_url as "external_workos_url": String,
        hook_custom_access_token_enabled as "hook_custom_access_token_enabled": bool,
        hook_custom_access_token_uri as "hook_custom_access_token_uri": String,
        hook_mfa_verification_attempt_enabled as "hook_mfa_verification_attempt_enabled": bool,
        hook_mfa_verification_attempt_uri as "hook_mfa_verification_attempt_uri": String,
        hook_password_verification_attempt_enabled as "hook_password_verification_attempt_enabled": bool,
        hook_password_verification_attempt_uri as "hook_password_verification_attempt_uri": String,
        hook_send_email_enabled as "hook_send_email_enabled": bool,
        hook_send_email_uri as "hook_send_email_uri": String,
        hook_send_sms_enabled as "hook_send_sms_enabled": bool,
        hook_send_sms_uri as "hook_send_sms_uri": String,
        // Write-only
        smtp_pass as "smtp_pass": String,
        sms_twilio_auth_token as "sms_twilio_auth_token": String,
        sms_twilio_verify_auth_token as "sms_twilio_verify_auth_token": String,
        sms_messagebird_access_key as "sms_messagebird_access_key": String,
        sms_textlocal_api_key as "sms_textlocal_api_key": String,
        sms_vonage_api_secret as "sms_vonage_api_secret": String,
        security_captcha_secret as "security_captcha_secret": String,
        external_apple_secret as "external_apple_secret": String,
        external_azure_secret as "external_azure_secret": String,
        external_bitbucket_secret as "external_bitbucket_secret": String,
        external_discord_secret as "external_discord_secret": String,
        external_facebook_secret as "external_facebook_secret": String,
        external_figma_secret as "external_figma_secret": String,
        external_github_secret as "external_github_secret": String,
        external_gitlab_secret as "external_gitlab_secret": String,
        external_google_secret as "external_google_secret": String,
        external_kakao_secret as "external_kakao_secret": String,
        external_keycloak_secret as "external_keycloak_secret": String,
        external_linkedin_oidc_secret as "external_linkedin_oidc_secret": String,
        external_notion_secret as "external_notion_secret": String,
        external_slack_oidc_secret as "external_slack_oidc_secret": String,
        external_slack_secret as "external_slack_secret": String,
        external_spotify_secret as "external_spotify_secret": String,
        external_twitch_secret as "external_twitch_secret": String,
        external_twitter_secret as "external_twitter_secret": String,
        external_workos_secret as "external_workos_secret": String,
        external_zoom_secret as "external_zoom_secret": String,
        hook_custom_access_token_secrets as "hook_custom_access_token_secrets": String,
        hook_mfa_verification_attempt_secrets as "hook_mfa_verification_attempt_secrets": String,
        hook_password_verification_attempt_secrets as "hook_password_verification_attempt_secrets": String,
        hook_send_email_secrets as "hook_send_email_secrets": String,
        hook_send_sms_secrets as "hook_send_sms_secrets": String,
    }
}

#[derive(Debug)]
pub struct AuthCategory;

impl Category for AuthCategory {
    const KIND: ConfigCategory = ConfigCategory::Auth;
    type Document = AuthSettings;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldRegistry, Nullable, PartialDocument};
    use serde_json::json;

    #[test]
    fn test_secrets_have_registry_entries() {
        for name in AUTH_SENSITIVE_FIELDS {
            assert!(AuthSettings::field(name).is_some(), "{name} missing");
        }
        assert_eq!(AuthSettings::sensitive_fields(), &AUTH_SENSITIVE_FIELDS[..]);
    }

    #[test]
    fn test_write_body_contains_only_declared_fields() {
        let partial = PartialDocument::from_json_str(
            r#"{"site_url": "https://example.com", "smtp_pass": "hunter2", "jwt_exp": 3600}"#,
        )
        .unwrap();
        let document = AuthSettings::from_partial(&partial).unwrap();
        let body = AuthCategory::encode_write(&document).unwrap();
        assert_eq!(
            body,
            json!({"site_url": "https://example.com", "jwt_exp": 3600, "smtp_pass": "hunter2"})
        );
    }

    #[test]
    fn test_read_keeps_null_secret_as_null() {
        let body = json!({"site_url": "http://localhost:3000", "smtp_pass": null});
        let document = AuthCategory::decode_read(body.to_string().as_bytes()).unwrap();
        assert_eq!(document.smtp_pass, Nullable::Null);
        assert!(document.external_github_secret.is_unspecified());
    }
}
