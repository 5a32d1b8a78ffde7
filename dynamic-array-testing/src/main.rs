use dynamic_array::{DynamicArray, dyn_array};

fn main() {
    let mut array = DynamicArray::new();
    let mut capacity = array.capacity();
    for i in 0..100u32 {
        array.push(i);
        if array.capacity() != capacity {
            println!("len {:>3}: capacity {} -> {}", array.len(), capacity, array.capacity());
            capacity = array.capacity();
        }
    }

    let mut words = dyn_array!["alpha", "gamma"];
    words.insert(1, "beta");
    let parsed = array.try_emplace_back_with(|| "not a number".parse::<u32>());
    println!("{words:?}, rejected append: {}", parsed.is_err());
}
