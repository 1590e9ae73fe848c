//! Schema fragments for common deployment platforms
//!
//! Each preset declares the system variables a platform injects into
//! builds and deployments. Every variable is optional, so a preset never
//! breaks a load when the program runs elsewhere. Merge a preset into your
//! own schema with [`Schema::merge`]:
//!
//! ```rust
//! use envshape::{presets, validate, Schema};
//!
//! # fn main() -> Result<(), envshape::EnvError> {
//! let schema = Schema::new()
//!     .var("DATABASE_URL", validate::url())?
//!     .merge(presets::vercel())?;
//! assert!(schema.contains("VERCEL_ENV"));
//! # Ok(())
//! # }
//! ```
//!
//! Platform variables are usually read verbatim, so pair a prefixed schema
//! with `disable_prefix(presets::vercel().names())`.

use crate::schema::Schema;
use crate::validate::{self, Validator, ValidatorExt};

fn opt_string() -> Box<dyn Validator> {
    validate::string().optional().boxed()
}

fn opt_flag() -> Box<dyn Validator> {
    validate::boolean().optional().boxed()
}

/// <https://vercel.com/docs/projects/environment-variables/system-environment-variables>
pub fn vercel() -> Schema {
    Schema::from_table(vec![
        ("VERCEL", opt_string()),
        ("CI", opt_string()),
        (
            "VERCEL_ENV",
            validate::enumeration(["development", "preview", "production"])
                .optional()
                .boxed(),
        ),
        ("VERCEL_URL", opt_string()),
        ("VERCEL_PROJECT_PRODUCTION_URL", opt_string()),
        ("VERCEL_BRANCH_URL", opt_string()),
        ("VERCEL_REGION", opt_string()),
        ("VERCEL_DEPLOYMENT_ID", opt_string()),
        ("VERCEL_SKEW_PROTECTION_ENABLED", opt_string()),
        ("VERCEL_AUTOMATION_BYPASS_SECRET", opt_string()),
        (
            "VERCEL_GIT_PROVIDER",
            validate::enumeration(["github", "gitlab", "bitbucket"])
                .optional()
                .boxed(),
        ),
        ("VERCEL_GIT_REPO_SLUG", opt_string()),
        ("VERCEL_GIT_REPO_OWNER", opt_string()),
        ("VERCEL_GIT_REPO_ID", opt_string()),
        ("VERCEL_GIT_COMMIT_REF", opt_string()),
        ("VERCEL_GIT_COMMIT_SHA", opt_string()),
        ("VERCEL_GIT_COMMIT_MESSAGE", opt_string()),
        ("VERCEL_GIT_COMMIT_AUTHOR_LOGIN", opt_string()),
        ("VERCEL_GIT_COMMIT_AUTHOR_NAME", opt_string()),
        ("VERCEL_GIT_PREVIOUS_SHA", opt_string()),
        ("VERCEL_GIT_PULL_REQUEST_ID", opt_string()),
    ])
}

/// <https://docs.netlify.com/configure-builds/environment-variables/>
pub fn netlify() -> Schema {
    Schema::from_table(vec![
        ("NETLIFY", opt_string()),
        ("BUILD_ID", opt_string()),
        (
            "CONTEXT",
            validate::enumeration(["production", "deploy-preview", "branch-deploy", "dev"])
                .optional()
                .boxed(),
        ),
        ("REPOSITORY_URL", opt_string()),
        ("BRANCH", opt_string()),
        ("HEAD", opt_string()),
        ("COMMIT_REF", opt_string()),
        ("CACHED_COMMIT_REF", opt_string()),
        ("PULL_REQUEST", opt_flag()),
        ("REVIEW_ID", opt_string()),
        ("URL", validate::url().optional().boxed()),
        ("DEPLOY_URL", validate::url().optional().boxed()),
        ("DEPLOY_PRIME_URL", validate::url().optional().boxed()),
        ("DEPLOY_ID", opt_string()),
        ("SITE_NAME", opt_string()),
        ("SITE_ID", opt_string()),
        ("NETLIFY_IMAGES_CDN_DOMAIN", opt_string()),
        ("INCOMING_HOOK_TITLE", opt_string()),
        ("INCOMING_HOOK_URL", opt_string()),
        ("INCOMING_HOOK_BODY", opt_string()),
    ])
}

/// <https://docs.railway.com/reference/variables#railway-provided-variables>
pub fn railway() -> Schema {
    Schema::from_table(vec![
        ("RAILWAY_PUBLIC_DOMAIN", opt_string()),
        ("RAILWAY_PRIVATE_DOMAIN", opt_string()),
        ("RAILWAY_TCP_PROXY_DOMAIN", opt_string()),
        ("RAILWAY_TCP_PROXY_PORT", validate::parse::<u16>().optional().boxed()),
        ("RAILWAY_TCP_APPLICATION_PORT", validate::parse::<u16>().optional().boxed()),
        ("RAILWAY_PROJECT_NAME", opt_string()),
        ("RAILWAY_PROJECT_ID", opt_string()),
        ("RAILWAY_ENVIRONMENT_NAME", opt_string()),
        ("RAILWAY_ENVIRONMENT_ID", opt_string()),
        ("RAILWAY_SERVICE_NAME", opt_string()),
        ("RAILWAY_SERVICE_ID", opt_string()),
        ("RAILWAY_REPLICA_ID", opt_string()),
        ("RAILWAY_DEPLOYMENT_ID", opt_string()),
        ("RAILWAY_SNAPSHOT_ID", opt_string()),
        ("RAILWAY_VOLUME_NAME", opt_string()),
        ("RAILWAY_VOLUME_MOUNT_PATH", opt_string()),
        ("RAILWAY_GIT_COMMIT_SHA", opt_string()),
        ("RAILWAY_GIT_AUTHOR", opt_string()),
        ("RAILWAY_GIT_BRANCH", opt_string()),
        ("RAILWAY_GIT_REPO_NAME", opt_string()),
        ("RAILWAY_GIT_REPO_OWNER", opt_string()),
        ("RAILWAY_GIT_COMMIT_MESSAGE", opt_string()),
    ])
}

/// <https://render.com/docs/environment-variables#all-runtimes>
pub fn render() -> Schema {
    Schema::from_table(vec![
        ("IS_PULL_REQUEST", opt_flag()),
        ("RENDER", opt_string()),
        ("RENDER_DISCOVERY_SERVICE", opt_string()),
        ("RENDER_EXTERNAL_HOSTNAME", opt_string()),
        ("RENDER_EXTERNAL_URL", validate::url().optional().boxed()),
        ("RENDER_GIT_BRANCH", opt_string()),
        ("RENDER_GIT_COMMIT", opt_string()),
        ("RENDER_GIT_REPO_SLUG", opt_string()),
        ("RENDER_INSTANCE_ID", opt_string()),
        ("RENDER_SERVICE_ID", opt_string()),
        ("RENDER_SERVICE_NAME", opt_string()),
        (
            "RENDER_SERVICE_TYPE",
            validate::enumeration(["web", "pserv", "cron", "worker", "static"])
                .optional()
                .boxed(),
        ),
    ])
}

/// <https://fly.io/docs/machines/runtime-environment/>
pub fn fly() -> Schema {
    Schema::from_table(vec![
        ("FLY_APP_NAME", opt_string()),
        ("FLY_MACHINE_ID", opt_string()),
        ("FLY_ALLOC_ID", opt_string()),
        ("FLY_REGION", opt_string()),
        ("FLY_PUBLIC_IP", opt_string()),
        ("FLY_IMAGE_REF", opt_string()),
        ("FLY_MACHINE_VERSION", opt_string()),
        ("FLY_PRIVATE_IP", opt_string()),
        ("FLY_PROCESS_GROUP", opt_string()),
        ("FLY_VM_MEMORY_MB", validate::parse::<u32>().optional().boxed()),
        ("PRIMARY_REGION", opt_string()),
    ])
}
