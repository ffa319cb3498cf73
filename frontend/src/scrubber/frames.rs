/// A contiguous, numbered run of still images served from one base path.
///
/// Frame `i` (zero based) lives at `{base_path}{start_frame + i:05}.jpg`.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSequence {
    base_path: String,
    frame_count: usize,
    start_frame: u32,
}

impl FrameSequence {
    pub fn new(base_path: impl Into<String>, frame_count: usize, start_frame: u32) -> Self {
        Self {
            base_path: base_path.into(),
            frame_count,
            start_frame,
        }
    }

    pub fn len(&self) -> usize {
        self.frame_count
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// File name for a zero-based frame index.
    pub fn file_name(&self, index: usize) -> String {
        format!("{:05}.jpg", self.start_frame as usize + index)
    }

    pub fn url(&self, index: usize) -> String {
        format!("{}{}", self.base_path, self.file_name(index))
    }

    pub fn urls(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.frame_count).map(move |index| self.url(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_last_frame_names_are_padded() {
        let frames = FrameSequence::new("/video-frames/", 192, 1);
        assert_eq!(frames.file_name(0), "00001.jpg");
        assert_eq!(frames.file_name(191), "00192.jpg");
        assert_eq!(frames.url(0), "/video-frames/00001.jpg");
    }

    #[test]
    fn start_offset_shifts_numbering() {
        let frames = FrameSequence::new("/f/", 3, 40);
        let urls: Vec<String> = frames.urls().collect();
        assert_eq!(urls, vec!["/f/00040.jpg", "/f/00041.jpg", "/f/00042.jpg"]);
    }

    #[test]
    fn numbers_wider_than_padding_are_not_truncated() {
        let frames = FrameSequence::new("", 1, 123456);
        assert_eq!(frames.file_name(0), "123456.jpg");
    }

    #[test]
    fn empty_sequence_yields_no_urls() {
        let frames = FrameSequence::new("/f/", 0, 1);
        assert!(frames.is_empty());
        assert_eq!(frames.urls().count(), 0);
    }
}
