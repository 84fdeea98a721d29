use treap_rk::TreapRk;

fn select(t: &TreapRk<i32>, k: usize) {
    match t.select(k) {
        Ok(key) => println!("Key of rank {} is {}", k, key),
        Err(e) => println!("No key of rank {}: {}", k, e),
    }
}

fn position(t: &TreapRk<i32>, key: i32) {
    let (rank, found) = t.position(&key);
    println!(
        "{} {} at rank {}",
        key,
        if found.is_some() { "is" } else { "would go" },
        rank
    );
}

fn main() {
    let mut t: TreapRk<i32> = TreapRk::with_seed(2012);
    for key in [5, 10, 15, 6, 12, 14] {
        t.insert(key);
    }
    println!("Inserted {:?}", t.iter().collect::<Vec<_>>());
    select(&t, 0);
    select(&t, 5);
    select(&t, 6);
    position(&t, 12);
    position(&t, 11);
    println!("{t:?}");

    let (mut low, mut high) = match t.split_pos(3) {
        Ok(halves) => halves,
        Err(e) => {
            println!("Split failed: {e}");
            return;
        }
    };
    println!(
        "Split at rank 3 into {:?} and {:?}",
        low.iter().collect::<Vec<_>>(),
        high.iter().collect::<Vec<_>>()
    );
    low.join_dup(&mut high);
    low.insert_dup(10);
    println!(
        "Joined back with a duplicate 10: {:?}",
        low.iter().collect::<Vec<_>>()
    );
    match low.remove_range(1..4) {
        Ok(taken) => println!(
            "Took ranks 1..4: {:?}, left {:?}",
            taken.iter().collect::<Vec<_>>(),
            low.iter().collect::<Vec<_>>()
        ),
        Err(e) => println!("Range removal failed: {e}"),
    }
}
