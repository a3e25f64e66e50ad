//! Error flags shared between the line driver and the converter.

use bitflags::bitflags;

bitflags! {
    /// Errors latched by the keyboard port.
    ///
    /// The port accumulates flags as operations fail; the converter reads
    /// and clears the whole word once per scan tick and decides whether the
    /// device needs to be re-identified.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PortError: u8 {
        /// Parity or framing error while receiving.
        const PARITY = 1 << 0;
        /// A host-to-device transmission was not acknowledged.
        const SEND = 1 << 1;
        /// The receive queue overflowed and bytes were dropped.
        const BUFFER_FULL = 1 << 2;
        /// The device stopped clocking mid-frame.
        const TIMEOUT = 1 << 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accumulate_and_clear() {
        let mut err = PortError::empty();
        err |= PortError::PARITY;
        err |= PortError::SEND;
        assert!(err.contains(PortError::PARITY | PortError::SEND));
        assert!(!err.contains(PortError::TIMEOUT));

        err = PortError::empty();
        assert!(err.is_empty());
    }
}
