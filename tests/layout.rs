// Layout conformance tests for the packet and slot records. These assert
// sizes, alignments, and field offsets, and print the observed values to
// aid debugging when a platform disagrees.
use memoffset::offset_of;
use packet_ring::queue::ring::CACHE_LINE_SIZE;
use packet_ring::queue::Slot;
use packet_ring::Packet;
use std::mem::{align_of, size_of};

#[test]
fn packet_layout() {
    let size = size_of::<Packet>();
    let align = align_of::<Packet>();
    let off_payload = offset_of!(Packet, payload);
    let off_length = offset_of!(Packet, length);
    let off_priority = offset_of!(Packet, priority);
    let off_id = offset_of!(Packet, id);

    println!(
        "Packet => size: {size}, align: {align}, offsets: [payload:{off_payload}, length:{off_length}, priority:{off_priority}, id:{off_id}]"
    );

    assert_eq!(size, 32);
    assert_eq!(align, align_of::<u64>());
    assert_eq!(off_payload, 0);
    assert_eq!(off_length, 8);
    assert_eq!(off_priority, 16);
    assert_eq!(off_id, 24);
}

#[test]
fn slot_occupies_one_cache_line() {
    let size = size_of::<Slot>();
    let align = align_of::<Slot>();

    println!("Slot => size: {size}, align: {align}");

    assert_eq!(size, CACHE_LINE_SIZE);
    assert_eq!(align, CACHE_LINE_SIZE);
}
