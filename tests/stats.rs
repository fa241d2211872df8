use packet_ring::{Packet, PacketQueue};

#[test]
fn disabled_stats_stay_zero() {
    let queue = PacketQueue::new(8).unwrap();
    assert!(!queue.stats().enabled());

    assert!(queue.enqueue(Packet::new(1)));
    queue.enqueue_batch(&[Packet::new(2), Packet::new(3)]);
    let mut out = vec![Packet::default(); 4];
    queue.dequeue_batch(&mut out);
    queue.dequeue();

    let stats = queue.stats();
    assert_eq!(stats.enqueue_attempts(), 0);
    assert_eq!(stats.enqueue_successes(), 0);
    assert_eq!(stats.dequeue_attempts(), 0);
    assert_eq!(stats.dequeue_successes(), 0);
    assert_eq!(stats.batch_enqueues(), 0);
    assert_eq!(stats.batch_dequeues(), 0);
    assert_eq!(stats.contention_events(), 0);
    assert_eq!(stats.enqueue_success_rate(), 0.0);
    assert_eq!(stats.dequeue_success_rate(), 0.0);
}

#[test]
fn counters_track_operations() {
    let queue = PacketQueue::with_stats(4).unwrap();
    assert!(queue.stats().enabled());

    for id in 0..4u64 {
        assert!(queue.enqueue(Packet::new(id)));
    }
    assert!(!queue.enqueue(Packet::new(4))); // full

    let stats = queue.stats();
    assert_eq!(stats.enqueue_attempts(), 5);
    assert_eq!(stats.enqueue_successes(), 4);
    assert!((stats.enqueue_success_rate() - 0.8).abs() < f64::EPSILON);

    assert!(queue.dequeue().is_some());
    assert_eq!(stats.dequeue_attempts(), 1);
    assert_eq!(stats.dequeue_successes(), 1);
    assert_eq!(stats.dequeue_success_rate(), 1.0);
}

#[test]
fn batch_calls_are_counted_once_each() {
    let queue = PacketQueue::with_stats(8).unwrap();
    let packets: Vec<Packet> = (0..4u64).map(Packet::new).collect();

    queue.enqueue_batch(&packets);
    queue.enqueue_batch(&packets);
    let mut out = vec![Packet::default(); 8];
    queue.dequeue_batch(&mut out);

    let stats = queue.stats();
    assert_eq!(stats.batch_enqueues(), 2);
    assert_eq!(stats.batch_dequeues(), 1);

    // empty input batches are not counted
    queue.enqueue_batch(&[]);
    assert_eq!(stats.batch_enqueues(), 2);
}

#[test]
fn reset_zeroes_every_counter() {
    let queue = PacketQueue::with_stats(8).unwrap();
    queue.enqueue(Packet::new(1));
    queue.enqueue(Packet::new(2));
    queue.dequeue();
    queue.enqueue_batch(&[Packet::new(3)]);

    queue.reset_stats();
    let stats = queue.stats();
    assert_eq!(stats.enqueue_attempts(), 0);
    assert_eq!(stats.enqueue_successes(), 0);
    assert_eq!(stats.dequeue_attempts(), 0);
    assert_eq!(stats.dequeue_successes(), 0);
    assert_eq!(stats.batch_enqueues(), 0);
    assert_eq!(stats.batch_dequeues(), 0);
    assert_eq!(stats.contention_events(), 0);
}

#[test]
fn success_rates_stay_in_unit_interval() {
    let queue = PacketQueue::with_stats(2).unwrap();
    assert_eq!(queue.stats().enqueue_success_rate(), 0.0); // zero attempts

    queue.enqueue(Packet::new(1));
    queue.enqueue(Packet::new(2));
    queue.enqueue(Packet::new(3)); // full
    queue.dequeue();

    let stats = queue.stats();
    for rate in [stats.enqueue_success_rate(), stats.dequeue_success_rate()] {
        assert!((0.0..=1.0).contains(&rate));
    }
    assert!(stats.enqueue_successes() <= stats.enqueue_attempts());
    assert!(stats.dequeue_successes() <= stats.dequeue_attempts());
}
