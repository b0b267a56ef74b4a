use clap::Parser;

pub const DEFAULT_UPSTREAM_URL: &str = "https://brat.siputzx.my.id/iphone-quoted";

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "iqc-gateway")]
#[command(about = "Cooldown-gated proxy for the iPhone quoted-chat image generator")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "IQC_PORT", default_value_t = 8080)]
    pub port: u16,

    // Image generator endpoint, parameters are appended as a query string
    #[arg(short, long, env = "IQC_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    // Minimum seconds between two forwarded generate requests
    #[arg(long, env = "IQC_COOLDOWN_SECS", default_value_t = 60)]
    pub cooldown_secs: u64,

    // max-age advertised on generated previews
    #[arg(long, env = "IQC_CACHE_MAX_AGE", default_value_t = 3600)]
    pub cache_max_age: u64,

    // Directory holding the front-end form, served for unmatched paths
    #[arg(long, env = "IQC_STATIC_DIR")]
    pub static_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hosted_deployment() {
        let args = Args::parse_from(["iqc-gateway"]);
        assert_eq!(args.port, 8080);
        assert_eq!(args.upstream_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(args.cooldown_secs, 60);
        assert_eq!(args.cache_max_age, 3600);
        assert!(args.static_dir.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "iqc-gateway",
            "--port",
            "9000",
            "--upstream-url",
            "http://127.0.0.1:4000/render",
            "--cooldown-secs",
            "5",
        ]);
        assert_eq!(args.port, 9000);
        assert_eq!(args.upstream_url, "http://127.0.0.1:4000/render");
        assert_eq!(args.cooldown_secs, 5);
    }
}
