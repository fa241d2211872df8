use packet_ring::{Packet, PacketPriority};

#[test]
fn default_packet_is_invalid() {
    let packet = Packet::default();
    assert!(!packet.is_valid());
    assert!(packet.payload.is_null());
    assert_eq!(packet.length, 0);
    assert_eq!(packet.priority, PacketPriority::Low);
    assert_eq!(packet.id, 0);
}

#[test]
fn payload_packet_is_valid_until_reset() {
    let mut data = *b"test data";
    let mut packet =
        Packet::with_payload(data.as_mut_ptr(), data.len(), PacketPriority::Medium, 1);
    assert!(packet.is_valid());

    packet.reset();
    assert!(!packet.is_valid());
    assert_eq!(packet, Packet::default());
}

#[test]
fn zero_length_payload_is_invalid() {
    let mut data = [0u8; 1];
    let packet = Packet::with_payload(data.as_mut_ptr(), 0, PacketPriority::Low, 1);
    assert!(!packet.is_valid());
}

#[test]
fn ordering_is_priority_major() {
    let mut low = Packet::new(1);
    low.priority = PacketPriority::Low;
    let mut high = Packet::new(2);
    high.priority = PacketPriority::High;

    assert!(low < high);
    assert!(!(high < low));

    // same priority falls back to id order
    let a = Packet::with_payload(std::ptr::null_mut(), 0, PacketPriority::Control, 3);
    let b = Packet::with_payload(std::ptr::null_mut(), 0, PacketPriority::Control, 9);
    assert!(a < b);
    assert!(PacketPriority::Control > PacketPriority::High);
}

#[test]
fn equality_ignores_payload() {
    let mut data = *b"payload";
    let a = Packet::with_payload(data.as_mut_ptr(), data.len(), PacketPriority::High, 7);
    let mut b = Packet::new(7);
    b.priority = PacketPriority::High;

    assert_eq!(a, b);
    assert_ne!(a, Packet::new(7)); // priority differs
    assert_ne!(a, Packet::with_payload(data.as_mut_ptr(), data.len(), PacketPriority::High, 8));
}

#[test]
fn copies_share_the_payload_bytes() {
    let mut data = *b"shared";
    let a = Packet::with_payload(data.as_mut_ptr(), data.len(), PacketPriority::Low, 1);
    let b = a;

    assert_eq!(a.payload, b.payload);
    assert_eq!(a.length, b.length);
}

#[test]
fn take_leaves_zero_state() {
    let mut data = [0u8; 4];
    let mut packet =
        Packet::with_payload(data.as_mut_ptr(), data.len(), PacketPriority::Control, 42);

    let moved = packet.take();
    assert_eq!(moved.id, 42);
    assert!(moved.is_valid());
    assert!(!packet.is_valid());
    assert_eq!(packet, Packet::default());
}
