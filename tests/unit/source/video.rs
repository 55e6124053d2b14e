use super::*;

#[test]
fn parse_rational_handles_ffprobe_forms() {
    assert_eq!(parse_rational("30/1"), Some(30.0));
    assert!((parse_rational("30000/1001").unwrap() - 29.97).abs() < 0.01);
    assert_eq!(parse_rational("25"), Some(25.0));
    assert_eq!(parse_rational("0/0"), None);
    assert_eq!(parse_rational("n/a"), None);
}

#[cfg(not(feature = "media-ffmpeg"))]
#[test]
fn open_without_feature_is_a_decode_error() {
    let err = FfmpegVideoSource::open(Path::new("clip.mp4")).unwrap_err();
    assert!(err.to_string().contains("media-ffmpeg"));
}

/// Hands out at most `chunk` bytes per read, like a pipe under load.
struct Trickle {
    data: std::io::Cursor<Vec<u8>>,
    chunk: usize,
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = buf.len().min(self.chunk);
        self.data.read(&mut buf[..n])
    }
}

#[test]
fn fill_frame_assembles_short_reads() {
    let mut src = Trickle {
        data: std::io::Cursor::new(vec![7u8; GRID_CELLS + 10]),
        chunk: 4093,
    };
    let mut buf = vec![0u8; GRID_CELLS];
    assert_eq!(fill_frame(&mut src, &mut buf).unwrap(), GRID_CELLS);
    assert!(buf.iter().all(|&v| v == 7));

    // Only the 10 trailing bytes are left.
    assert_eq!(fill_frame(&mut src, &mut buf).unwrap(), 10);
    assert_eq!(fill_frame(&mut src, &mut buf).unwrap(), 0);
}

#[test]
fn empty_read_ends_the_stream() {
    assert!(grid_from_frame(vec![0; GRID_CELLS], 0).unwrap().is_none());
}

#[test]
fn full_read_becomes_a_grid() {
    let grid = grid_from_frame(vec![42; GRID_CELLS], GRID_CELLS).unwrap().unwrap();
    assert_eq!(grid.at_cell(GRID_CELLS - 1), 42);
}

#[test]
fn partial_read_is_a_truncated_frame_error() {
    let err = grid_from_frame(vec![0; GRID_CELLS], 1000).unwrap_err();
    assert!(matches!(err, HilligossError::Decode(_)));
    assert!(err.to_string().contains("truncated frame (1000 of"));
}

// Spawning `ffmpeg`/`ffprobe` is covered by `tests/media_pipeline.rs` (feature `media-ffmpeg`),
// which skips when the tools are not on PATH.
