use super::*;

#[test]
fn pcm_sink_writes_little_endian_interleaved() {
    let dir = std::env::temp_dir().join(format!(
        "hilligoss_pcm_sink_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let path = dir.join("out.pcm");

    let mut sink = PcmSink::new(&path);
    sink.begin(SinkConfig::stereo(48_000)).unwrap();
    sink.push_frame(FrameIndex(0), &[1, -2]).unwrap();
    sink.push_frame(FrameIndex(1), &[-32768, 32767]).unwrap();
    sink.end().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes, vec![0x01, 0x00, 0xFE, 0xFF, 0x00, 0x80, 0xFF, 0x7F]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn double_begin_is_rejected() {
    let dir = std::env::temp_dir().join(format!("hilligoss_pcm_twice_{}", std::process::id()));
    let mut sink = PcmSink::new(dir.join("twice.pcm"));
    sink.begin(SinkConfig::stereo(48_000)).unwrap();
    assert!(sink.begin(SinkConfig::stereo(48_000)).is_err());
    sink.end().unwrap();
    let _ = std::fs::remove_dir_all(&dir);
}
