use bitflags::bitflags;

bitflags! {
  /// Flags associated with a `Msg` indicating its role within a logical
  /// notification.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
  pub struct MsgFlags: u8 {
    /// More message parts follow this one.
    const MORE = 0b01;
  }
}
