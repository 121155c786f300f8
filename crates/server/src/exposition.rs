//! Exposition of a [`SignalSnapshot`] through the `prometheus` crate.
//!
//! Each collection builds a short-lived `prometheus::Registry` holding one
//! gauge per sample, gathers it, and encodes the families with the encoder
//! chosen from the request's `Accept` header: the text format 0.0.4 (the
//! default) or the delimited protobuf format.

use prometheus::proto::MetricFamily;
use prometheus::{Encoder, Gauge, Opts, ProtobufEncoder, Registry, TextEncoder};

use cronwave_signals::SignalSnapshot;

const PROTOBUF_MEDIA_TYPE: &str = "application/vnd.google.protobuf";
const PROTOBUF_PROTO: &str = "io.prometheus.client.MetricFamily";
const PROTOBUF_ENCODING: &str = "delimited";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Protobuf,
}

impl Format {
    /// Pick the format for an `Accept` header value.
    ///
    /// The supported media range with the highest quality wins; on a tie
    /// protobuf is preferred. Anything unrecognised falls back to text.
    pub fn negotiate(accept: Option<&str>) -> Self {
        let Some(accept) = accept else {
            return Self::Text;
        };

        let mut best: Option<(f32, Self)> = None;
        for entry in accept.split(',') {
            let Some((format, quality)) = parse_media_range(entry) else {
                continue;
            };
            if quality <= 0.0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((q, current)) => {
                    quality > q || (quality == q && format == Self::Protobuf && current == Self::Text)
                }
            };
            if better {
                best = Some((quality, format));
            }
        }

        best.map(|(_, format)| format).unwrap_or(Self::Text)
    }

    pub fn content_type(self) -> String {
        match self {
            Self::Text => TextEncoder::new().format_type().to_string(),
            Self::Protobuf => ProtobufEncoder::new().format_type().to_string(),
        }
    }

    /// Encode gathered families in this format.
    pub fn encode(self, families: &[MetricFamily]) -> prometheus::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        match self {
            Self::Text => TextEncoder::new().encode(families, &mut buffer)?,
            Self::Protobuf => ProtobufEncoder::new().encode(families, &mut buffer)?,
        }
        Ok(buffer)
    }
}

/// One `Accept` entry mapped to a supported format and its quality.
fn parse_media_range(entry: &str) -> Option<(Format, f32)> {
    let mut parts = entry.split(';').map(str::trim);
    let media = parts.next()?.to_ascii_lowercase();
    let params: Vec<(String, String)> = parts
        .filter_map(|p| p.split_once('='))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().trim_matches('"').to_string()))
        .collect();
    let param = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    let format = match media.as_str() {
        PROTOBUF_MEDIA_TYPE
            if param("proto") == Some(PROTOBUF_PROTO)
                && param("encoding") == Some(PROTOBUF_ENCODING) =>
        {
            Format::Protobuf
        }
        "text/plain" | "text/*" | "*/*" => Format::Text,
        _ => return None,
    };
    let quality = param("q")
        .and_then(|q| q.parse::<f32>().ok())
        .unwrap_or(1.0);
    Some((format, quality))
}

/// Turn a snapshot into gauge families, sorted by name.
///
/// Constant labels (the build info's `name`/`version`) become const labels on
/// the gauge.
pub fn gather(snapshot: &SignalSnapshot) -> prometheus::Result<Vec<MetricFamily>> {
    let registry = Registry::new();

    for sample in snapshot.iter() {
        let opts = Opts::new(sample.name.as_str(), sample.help.as_str())
            .const_labels(sample.labels.iter().cloned().collect());
        let gauge = Gauge::with_opts(opts)?;
        gauge.set(sample.value);
        registry.register(Box::new(gauge))?;
    }

    Ok(registry.gather())
}

/// Gather and encode in one step.
pub fn render(snapshot: &SignalSnapshot, format: Format) -> prometheus::Result<Vec<u8>> {
    format.encode(&gather(snapshot)?)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use cronwave_signals::Sample;

    use super::*;

    const PROTOBUF_ACCEPT: &str =
        "application/vnd.google.protobuf;proto=io.prometheus.client.MetricFamily;encoding=delimited";

    fn sample(name: &str, help: &str, labels: &[(&str, &str)], value: f64) -> Sample {
        Sample {
            name: name.to_string(),
            help: help.to_string(),
            labels: labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            value,
        }
    }

    fn snapshot(samples: Vec<Sample>) -> SignalSnapshot {
        SignalSnapshot {
            taken_at: Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap(),
            samples,
        }
    }

    fn text(snap: &SignalSnapshot) -> String {
        String::from_utf8(render(snap, Format::Text).unwrap()).unwrap()
    }

    #[test]
    fn text_format_has_help_type_and_value() {
        let snap = snapshot(vec![
            sample("epoch_seconds", "Seconds since Unix epoch.", &[], 1_760_868_000.0),
            sample("sin", "Oscillating sin function.", &[], -0.5),
        ]);

        let output = text(&snap);
        assert!(output.contains("# HELP epoch_seconds Seconds since Unix epoch.\n"));
        assert!(output.contains("# TYPE epoch_seconds gauge\n"));
        assert!(output.contains("epoch_seconds 1760868000\n"));
        assert!(output.contains("# HELP sin Oscillating sin function.\n"));
        assert!(output.contains("# TYPE sin gauge\n"));
        assert!(output.contains("sin -0.5\n"));
        assert!(output.find("epoch_seconds").unwrap() < output.find("# HELP sin").unwrap());
    }

    #[test]
    fn empty_snapshot_encodes_to_nothing() {
        assert!(render(&snapshot(vec![]), Format::Text).unwrap().is_empty());
    }

    #[test]
    fn labels_become_const_labels() {
        let snap = snapshot(vec![sample(
            "cronwave_build_info",
            "Build.",
            &[("version", "0.1.0"), ("name", "cronwave")],
            1.0,
        )]);

        let families = gather(&snap).unwrap();
        assert_eq!(families.len(), 1);
        let labels = families[0].get_metric()[0].get_label();
        let pairs: Vec<(&str, &str)> = labels.iter().map(|l| (l.get_name(), l.get_value())).collect();
        assert_eq!(pairs, vec![("name", "cronwave"), ("version", "0.1.0")]);

        assert!(text(&snap).contains("cronwave_build_info{name=\"cronwave\",version=\"0.1.0\"} 1\n"));
    }

    #[test]
    fn label_values_are_escaped_by_encoder() {
        let snap = snapshot(vec![sample("x", "X.", &[("v", "a\"b")], 0.0)]);
        assert!(text(&snap).contains("x{v=\"a\\\"b\"} 0\n"));
    }

    #[test]
    fn invalid_metric_name_is_an_error() {
        let snap = snapshot(vec![sample("bad name", "X.", &[], 0.0)]);
        assert!(gather(&snap).is_err());
    }

    #[test]
    fn protobuf_encoding_is_not_text() {
        let snap = snapshot(vec![sample("sin", "Oscillating sin function.", &[], 0.25)]);
        let bytes = render(&snap, Format::Protobuf).unwrap();
        assert!(!bytes.is_empty());
        assert!(!bytes.starts_with(b"# HELP"));
    }

    #[test]
    fn negotiate_defaults_to_text() {
        assert_eq!(Format::negotiate(None), Format::Text);
        assert_eq!(Format::negotiate(Some("*/*")), Format::Text);
        assert_eq!(Format::negotiate(Some("text/plain;version=0.0.4")), Format::Text);
        assert_eq!(Format::negotiate(Some("application/json")), Format::Text);
        // protobuf without the required parameters is not the delimited format
        assert_eq!(Format::negotiate(Some("application/vnd.google.protobuf")), Format::Text);
    }

    #[test]
    fn negotiate_picks_protobuf_when_asked() {
        assert_eq!(Format::negotiate(Some(PROTOBUF_ACCEPT)), Format::Protobuf);
        assert_eq!(
            Format::negotiate(Some(format!("{PROTOBUF_ACCEPT};q=0.7,text/plain;version=0.0.4;q=0.3,*/*;q=0.1").as_str())),
            Format::Protobuf
        );
    }

    #[test]
    fn negotiate_honours_quality_weights() {
        assert_eq!(
            Format::negotiate(Some(format!("{PROTOBUF_ACCEPT};q=0.3,text/plain;q=0.9").as_str())),
            Format::Text
        );
        assert_eq!(
            Format::negotiate(Some(format!("{PROTOBUF_ACCEPT};q=0,text/plain").as_str())),
            Format::Text
        );
        // equal weights prefer protobuf
        assert_eq!(
            Format::negotiate(Some(format!("text/plain,{PROTOBUF_ACCEPT}").as_str())),
            Format::Protobuf
        );
    }

    #[test]
    fn content_types_come_from_encoders() {
        assert!(Format::Text.content_type().starts_with("text/plain; version=0.0.4"));
        assert!(Format::Protobuf
            .content_type()
            .starts_with("application/vnd.google.protobuf"));
    }
}
