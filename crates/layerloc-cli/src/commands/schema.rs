use crate::{ui_ok, Ctx};
use std::fs;
use std::path::PathBuf;

pub fn run_schema(ctx: &Ctx, out_dir: Option<PathBuf>) -> color_eyre::Result<()> {
    let out_dir = out_dir.unwrap_or_else(|| {
        PathBuf::from(
            ctx.cfg
                .schema
                .as_ref()
                .and_then(|s| s.out_dir.clone())
                .unwrap_or_else(|| "./docs/assets/schemas".to_string()),
        )
    });
    fs::create_dir_all(&out_dir)?;
    macro_rules! dump {
        ($ty:ty, $name:literal) => {{
            let schema = schemars::schema_for!($ty);
            let path = out_dir.join($name);
            let f = std::fs::File::create(&path)?;
            serde_json::to_writer_pretty(f, &schema)?;
        }};
    }
    dump!(layerloc_domain::ExportSummary, "export_summary.schema.json");
    dump!(layerloc_domain::ImportSummary, "import_summary.schema.json");
    dump!(layerloc_domain::PseudoSummary, "pseudo_summary.schema.json");
    dump!(layerloc_domain::UploadSummary, "upload_summary.schema.json");
    dump!(layerloc_domain::ContextString, "context_string.schema.json");
    ui_ok!("Schemas written to {}", out_dir.display());
    Ok(())
}
