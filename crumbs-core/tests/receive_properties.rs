use std::sync::atomic::{AtomicUsize, Ordering};

use crumbs_core::{Context, Endpoint, Error, FrameError, Message, CMD_SET_REPLY};
use proptest::prelude::*;

proptest! {
    #[test]
    fn arbitrary_bytes_never_panic_and_only_crc_is_counted(
        frames in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..40), 1..8)
    ) {
        let seen = AtomicUsize::new(0);
        let mut on_message = |_: &Endpoint, _: &Message| {
            seen.fetch_add(1, Ordering::Relaxed);
        };

        let mut ctx: Context = Context::peripheral(0x10);
        ctx.set_callbacks(Some(&mut on_message), None);

        let mut checksum_errors = 0;
        let mut delivered = 0;
        for bytes in &frames {
            match ctx.handle_receive(bytes) {
                Ok(()) => {
                    if bytes[1] != CMD_SET_REPLY {
                        delivered += 1;
                    }
                }
                Err(Error::Frame(FrameError::InvalidChecksum)) => checksum_errors += 1,
                Err(Error::Frame(e)) => prop_assert!(!e.is_integrity()),
                Err(e) => prop_assert!(false, "unexpected error {:?}", e),
            }
        }

        prop_assert_eq!(ctx.crc_error_count(), checksum_errors);
        prop_assert_eq!(seen.load(Ordering::Relaxed), delivered);
    }

    #[test]
    fn set_reply_stores_first_byte(target in any::<u8>(), tail in proptest::collection::vec(any::<u8>(), 0..8)) {
        let mut payload = vec![target];
        payload.extend_from_slice(&tail);
        let frame = Message::new(0, CMD_SET_REPLY, &payload).unwrap().encode_to_vec().unwrap();

        let mut ctx: Context = Context::peripheral(0x10);
        ctx.handle_receive(&frame).unwrap();
        prop_assert_eq!(ctx.requested_opcode(), target);
    }
}
