//! Flash Image Unit Tests.

use housekeeping_core::boot::FlashImage;
use housekeeping_core::soc::ByteSource;

#[test]
fn streams_bytes_in_order_then_ends() {
    let mut flash = FlashImage::new(vec![7, 8, 9]);
    assert_eq!(flash.len(), 3);
    assert_eq!(flash.next_byte(), Some(7));
    assert_eq!(flash.next_byte(), Some(8));
    assert_eq!(flash.consumed(), 2);
    assert_eq!(flash.remaining(), 1);
    assert_eq!(flash.next_byte(), Some(9));
    assert_eq!(flash.next_byte(), None);
    assert_eq!(flash.next_byte(), None);
}

#[test]
fn rewind_restarts_the_stream() {
    let mut flash = FlashImage::new(vec![1, 2]);
    let _ = flash.next_byte();
    let _ = flash.next_byte();
    flash.rewind();
    assert_eq!(flash.consumed(), 0);
    assert_eq!(flash.next_byte(), Some(1));
}

#[test]
fn restart_through_trait_object_rewinds() {
    let mut flash: Box<dyn ByteSource> = Box::new(FlashImage::new(vec![5, 6, 7]));
    let _ = flash.next_byte();
    let _ = flash.next_byte();
    flash.restart();
    assert_eq!(flash.next_byte(), Some(5));
}

#[test]
fn counting_pattern_covers_the_boot_length() {
    let flash = FlashImage::counting(2);
    assert_eq!(flash.as_bytes(), &[0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(FlashImage::counting(128).as_bytes()[257], 1);
}

#[test]
fn from_words_stores_little_endian() {
    let flash = FlashImage::from_words(&[0x4433_2211, 0x8877_6655]);
    assert_eq!(
        flash.as_bytes(),
        &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]
    );
}

#[test]
fn empty_image_ends_immediately() {
    let mut flash = FlashImage::default();
    assert!(flash.is_empty());
    assert_eq!(flash.next_byte(), None);
}
