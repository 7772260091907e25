//! `mockall` double for the flash byte stream.

use housekeeping_core::soc::ByteSource;
use mockall::mock;

mock! {
    pub Flash {}
    impl ByteSource for Flash {
        fn next_byte(&mut self) -> Option<u8>;
        fn restart(&mut self);
    }
}
