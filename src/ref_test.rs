const LANES: i64 = 6;

// reference model, one slot for every (primary, secondary) key on a
// `size` x LANES grid. Slot order is the same as key order.
struct RefEntries {
    entries: Vec<Option<i64>>,
}

impl RefEntries {
    fn new(size: usize) -> RefEntries {
        RefEntries {
            entries: vec![None; size * (LANES as usize)],
        }
    }

    fn slot(p: i64, s: i64) -> usize {
        (p * LANES + s) as usize
    }

    fn insert(&mut self, p: i64, s: i64, value: i64) -> bool {
        let entry = &mut self.entries[RefEntries::slot(p, s)];
        if entry.is_some() {
            false
        } else {
            *entry = Some(value);
            true
        }
    }

    fn delete(&mut self, p: i64, s: i64) -> bool {
        self.entries[RefEntries::slot(p, s)].take().is_some()
    }

    fn get(&self, p: i64, s: i64) -> Option<i64> {
        self.entries[RefEntries::slot(p, s)]
    }

    fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    fn iter(&self) -> Vec<(i64, i64, i64)> {
        self.range(i64::MIN, i64::MAX, i64::MIN, i64::MAX)
    }

    fn range(&self, pmin: i64, pmax: i64, smin: i64, smax: i64) -> Vec<(i64, i64, i64)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, value)| {
                let (p, s) = ((i as i64) / LANES, (i as i64) % LANES);
                match value {
                    Some(v) if pmin <= p && p <= pmax && smin <= s && s <= smax => Some((p, s, *v)),
                    _ => None,
                }
            })
            .collect()
    }
}

fn flatten(entries: Vec<Entry<i64>>) -> Vec<(i64, i64, i64)> {
    entries
        .into_iter()
        .map(|e| (e.primary(), e.secondary(), *e.value()))
        .collect()
}

fn sorted(mut items: Vec<(i64, i64, i64)>) -> Vec<(i64, i64, i64)> {
    items.sort();
    items
}

fn random_window<R: Rng>(rng: &mut R, size: usize) -> (i64, i64, i64, i64) {
    let size = size as i64;
    // occasionally spill outside the populated grid, or invert the window.
    let pmin = rng.gen_range(-2, size + 2);
    let pmax = rng.gen_range(-2, size + 2);
    let smin = rng.gen_range(-1, LANES + 1);
    let smax = rng.gen_range(-1, LANES + 1);
    (pmin, pmax, smin, smax)
}
