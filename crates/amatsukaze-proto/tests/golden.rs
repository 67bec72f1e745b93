use amatsukaze_proto::{AddQueueRequest, encode_add_queue_request, read_frame, response_text};

const GOLDEN: &str = include_str!("fixtures/add_queue_request.xml");

fn golden_request() -> AddQueueRequest {
    AddQueueRequest::new(
        r"D:\encoded",
        "x265 default",
        r"\\nas\rec\show.ts",
        "0a4c6f8e-3b3d-4f61-9d1f-6a1d2c1f5e77",
    )
}

#[test]
fn request_xml_matches_golden() {
    assert_eq!(golden_request().to_xml(), GOLDEN.trim_end());
}

#[test]
fn request_frame_matches_golden() {
    let xml = GOLDEN.trim_end().as_bytes();
    let inner = xml.len() as u32;

    let mut expected = vec![102u8, 0];
    expected.extend_from_slice(&(inner + 4).to_le_bytes());
    expected.extend_from_slice(&inner.to_le_bytes());
    expected.extend_from_slice(xml);

    let encoded = encode_add_queue_request(&golden_request()).unwrap();
    assert_eq!(encoded, expected);

    let frame = read_frame(encoded.as_slice()).unwrap();
    assert_eq!(response_text(&frame.payload), GOLDEN.trim_end());
}
