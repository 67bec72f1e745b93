//! Add-queue request model and its XML data-contract serialization.
//!
//! The server deserializes with a data-contract serializer, so element names,
//! their order and the two namespace declarations on the root must match
//! exactly. Nullable strings always emit their element and signal null with
//! `i:nil="true"`.

use std::fmt::Write as _;

const DATA_CONTRACT_NS: &str = "http://schemas.datacontract.org/2004/07/Amatsukaze.Server";
const XML_SCHEMA_INSTANCE_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Batch mode: the server picks up the target immediately.
pub const AUTO_BATCH_MODE: &str = "AutoBatch";

/// Priority given to every job this client submits.
pub const DEFAULT_PRIORITY: i32 = 3;

/// A string that may be null on the wire.
///
/// `Present(String::new())` and `Absent` are different values: the first
/// serializes with `i:nil="false"`, the second with `i:nil="true"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NullableString {
    #[default]
    Absent,
    Present(String),
}

impl NullableString {
    pub fn is_nil(&self) -> bool {
        matches!(self, NullableString::Absent)
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            NullableString::Absent => None,
            NullableString::Present(s) => Some(s),
        }
    }
}

impl From<Option<String>> for NullableString {
    fn from(value: Option<String>) -> Self {
        value.map_or(NullableString::Absent, NullableString::Present)
    }
}

/// Where and how the encoded output is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputInfo {
    pub dst_path: String,
    pub priority: i32,
    pub profile: String,
}

/// The single input file of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddQueueItem {
    pub hash: NullableString,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddQueueRequest {
    pub add_queue_bat: NullableString,
    pub dir_path: NullableString,
    pub mode: String,
    pub outputs: OutputInfo,
    /// Echoed back by the server in its responses.
    pub request_id: String,
    pub targets: AddQueueItem,
}

impl AddQueueRequest {
    /// Build an auto-batch request for one input file.
    pub fn new(
        dst_path: impl Into<String>,
        profile: impl Into<String>,
        input_path: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            add_queue_bat: NullableString::Absent,
            dir_path: NullableString::Absent,
            mode: AUTO_BATCH_MODE.to_string(),
            outputs: OutputInfo {
                dst_path: dst_path.into(),
                priority: DEFAULT_PRIORITY,
                profile: profile.into(),
            },
            request_id: request_id.into(),
            targets: AddQueueItem {
                hash: NullableString::Absent,
                path: input_path.into(),
            },
        }
    }

    /// Same as [`AddQueueRequest::new`] with a fresh random v4 UUID.
    pub fn with_random_id(
        dst_path: impl Into<String>,
        profile: impl Into<String>,
        input_path: impl Into<String>,
    ) -> Self {
        Self::new(
            dst_path,
            profile,
            input_path,
            uuid::Uuid::new_v4().to_string(),
        )
    }

    /// Serialize to the server's XML schema (no declaration, no whitespace).
    pub fn to_xml(&self) -> String {
        let mut x = XmlWriter::default();
        x.out.push_str("<AddQueueRequest");
        x.attr("xmlns", DATA_CONTRACT_NS);
        x.attr("xmlns:i", XML_SCHEMA_INSTANCE_NS);
        x.out.push('>');

        x.nullable("AddQueueBat", &self.add_queue_bat);
        x.nullable("DirPath", &self.dir_path);
        x.text("Mode", &self.mode);

        x.open("Outputs");
        x.open("OutputInfo");
        x.text("DstPath", &self.outputs.dst_path);
        x.text("Priority", &self.outputs.priority.to_string());
        x.text("Profile", &self.outputs.profile);
        x.close("OutputInfo");
        x.close("Outputs");

        x.text("RequestId", &self.request_id);

        x.open("Targets");
        x.open("AddQueueItem");
        x.nullable("Hash", &self.targets.hash);
        x.text("Path", &self.targets.path);
        x.close("AddQueueItem");
        x.close("Targets");

        x.close("AddQueueRequest");
        x.out
    }
}

#[derive(Default)]
struct XmlWriter {
    out: String,
}

impl XmlWriter {
    fn open(&mut self, name: &str) {
        let _ = write!(self.out, "<{name}>");
    }

    fn close(&mut self, name: &str) {
        let _ = write!(self.out, "</{name}>");
    }

    fn attr(&mut self, name: &str, value: &str) {
        let _ = write!(self.out, " {name}=\"");
        escape_into(&mut self.out, value);
        self.out.push('"');
    }

    fn text(&mut self, name: &str, value: &str) {
        self.open(name);
        escape_into(&mut self.out, value);
        self.close(name);
    }

    fn nullable(&mut self, name: &str, value: &NullableString) {
        let _ = write!(self.out, "<{name}");
        self.attr("i:nil", if value.is_nil() { "true" } else { "false" });
        self.out.push('>');
        if let Some(s) = value.as_deref() {
            escape_into(&mut self.out, s);
        }
        self.close(name);
    }
}

/// Escape text and attribute values.
///
/// Whitespace control characters become character references so a parser
/// does not normalize them, and characters XML 1.0 forbids become U+FFFD.
fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c if is_xml_char(c) => out.push(c),
            _ => out.push(char::REPLACEMENT_CHARACTER),
        }
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}
