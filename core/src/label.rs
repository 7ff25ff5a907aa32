//! Writing shipping labels from a processed shipment to disk.

use std::fs;
use std::path::PathBuf;

use crate::config::FedexConfig;
use crate::error::Result;
use crate::reply::Reply;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Standard,
    CashOnDelivery,
}

/// `<dir>/<label_name><tracking>.<ext>`, with a `cod_` prefix for COD labels.
pub fn label_path(config: &FedexConfig, tracking_number: &str, kind: LabelKind) -> PathBuf {
    let prefix = match kind {
        LabelKind::Standard => "",
        LabelKind::CashOnDelivery => "cod_",
    };
    config.download_location.join(format!(
        "{prefix}{}{tracking_number}.{}",
        config.label_name,
        config.label_type.extension()
    ))
}

/// Write the requested label kinds for every completed package in `reply`.
/// Packages without an image of a requested kind are skipped. Returns the
/// paths written, in package order.
pub fn download_label(config: &FedexConfig, reply: &Reply, kinds: &[LabelKind]) -> Result<Vec<PathBuf>> {
    let packages = reply.completed_packages()?;
    if packages.is_empty() {
        return Ok(Vec::new());
    }
    fs::create_dir_all(&config.download_location)?;

    let mut written = Vec::new();
    for package in &packages {
        for kind in [LabelKind::CashOnDelivery, LabelKind::Standard] {
            if !kinds.contains(&kind) {
                continue;
            }
            let image = match kind {
                LabelKind::Standard => package.label.as_deref(),
                LabelKind::CashOnDelivery => package.cod_label.as_deref(),
            };
            let Some(image) = image else {
                tracing::warn!(tracking_number = %package.tracking_number, ?kind, "reply carries no label image");
                continue;
            };
            let path = label_path(config, &package.tracking_number, kind);
            fs::write(&path, image)?;
            tracing::info!(path = %path.display(), bytes = image.len(), "label written");
            written.push(path);
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::request::Operation;
    use crate::types::LabelImageType;

    fn shipment_reply() -> Reply {
        Reply::from_tree(
            Operation::ProcessShipment,
            json!({
                "HighestSeverity": "SUCCESS",
                "CompletedShipmentDetail": {
                    "CompletedPackageDetails": {
                        "TrackingIds": {"TrackingNumber": "123456"},
                        "Label": {"Parts": {"Image": "JVBERi0xLjQgbGFiZWw="}},
                        "CodReturnDetail": {"Label": {"Parts": {"Image": "Y29kIGxhYmVs"}}}
                    }
                }
            }),
        )
        .unwrap()
    }

    #[test]
    fn label_path_uses_name_tracking_and_extension() {
        let mut config = FedexConfig::default();
        config.set_download_path("/tmp/labels");
        config.label_type = LabelImageType::Png;
        assert_eq!(
            label_path(&config, "42", LabelKind::Standard),
            PathBuf::from("/tmp/labels/label42.png")
        );
        assert_eq!(
            label_path(&config, "42", LabelKind::CashOnDelivery),
            PathBuf::from("/tmp/labels/cod_label42.png")
        );
    }

    #[test]
    fn writes_exact_label_bytes_and_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FedexConfig::default();
        config.set_download_path(dir.path().join("nested"));
        config.label_type = LabelImageType::Pdf;

        let written = download_label(&config, &shipment_reply(), &[LabelKind::Standard]).unwrap();
        let expected = dir.path().join("nested").join("label123456.pdf");
        assert_eq!(written, vec![expected.clone()]);
        assert_eq!(fs::read(expected).unwrap(), b"%PDF-1.4 label");
    }

    #[test]
    fn writes_cod_label_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FedexConfig::default();
        config.set_download_path(dir.path());

        let written = download_label(
            &config,
            &shipment_reply(),
            &[LabelKind::Standard, LabelKind::CashOnDelivery],
        )
        .unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(fs::read(dir.path().join("cod_label123456.pdf")).unwrap(), b"cod label");
        assert!(dir.path().join("label123456.pdf").is_file());
    }

    #[test]
    fn reply_without_packages_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FedexConfig::default();
        config.set_download_path(dir.path().join("never"));
        let reply = Reply::from_tree(Operation::ProcessShipment, json!({"HighestSeverity": "SUCCESS"})).unwrap();

        assert!(download_label(&config, &reply, &[LabelKind::Standard]).unwrap().is_empty());
        assert!(!dir.path().join("never").exists());
    }
}
