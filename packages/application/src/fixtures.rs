//! Hand-built register pages shared by the tests.

use da_register_layout::TextFragment;

fn fragment(text: &str, x: f64, y: f64, width: f64) -> TextFragment {
    TextFragment::new(text, x, y, width, 10.0)
}

/// Address slots of one fixture record.
pub struct Slots<'a> {
    pub number: &'a str,
    pub house: &'a str,
    pub street: &'a str,
    pub suburb: &'a str,
}

/// One register record laid out the way the council prints it, starting
/// at `top`.  Labels sit at `x = 20` and `x = 250`, values at `x = 110`
/// and `x = 350`, one row every 15 units.
pub fn record(top: f64, slots: &Slots<'_>) -> Vec<TextFragment> {
    let row = |index: u32| f64::from(index).mul_add(15.0, top);
    let mut fragments = vec![
        fragment("Application No", 20.0, row(0), 70.0),
        fragment(":", 95.0, row(0), 3.0),
        fragment("Application Date", 250.0, row(0), 80.0),
        fragment("19/02/2019", 350.0, row(0), 50.0),
        fragment("Planning Approval", 450.0, row(0), 85.0),
        fragment("Applicants Name", 20.0, row(1), 75.0),
        fragment("J SMITH", 110.0, row(1), 40.0),
        fragment("Application Received", 250.0, row(1), 95.0),
        fragment("21/02/2019", 350.0, row(1), 50.0),
        fragment("Building Approval", 450.0, row(1), 85.0),
        fragment("Applicants Address", 20.0, row(2), 90.0),
        fragment("Land Division Approval", 250.0, row(2), 110.0),
        fragment("Property House No", 20.0, row(3), 85.0),
        fragment("Planning Conditions", 250.0, row(3), 95.0),
        fragment("Lot", 20.0, row(4), 15.0),
        fragment("4", 110.0, row(4), 5.0),
        fragment("Section", 20.0, row(5), 35.0),
        fragment("Plan", 20.0, row(6), 20.0),
        fragment("D1234", 110.0, row(6), 30.0),
        fragment("Property Street", 20.0, row(7), 75.0),
        fragment("Property Suburb", 20.0, row(8), 75.0),
        fragment("Title", 20.0, row(9), 25.0),
        fragment("CT5123/456", 110.0, row(9), 55.0),
        fragment("Hundred", 20.0, row(10), 40.0),
        fragment("KULPARA", 110.0, row(10), 40.0),
        fragment("Development Description", 20.0, row(11), 115.0),
        fragment("Relevant Authority", 250.0, row(11), 90.0),
        fragment("Dwelling and", 20.0, row(12), 60.0),
        fragment("shed", 85.0, row(12), 25.0),
        fragment("Council Delegate", 250.0, row(12), 80.0),
        fragment("Private Certifier Name", 20.0, row(13), 110.0),
    ];

    for (text, index) in [
        (slots.number, 0),
        (slots.house, 3),
        (slots.street, 7),
        (slots.suburb, 8),
    ] {
        if !text.is_empty() {
            fragments.push(fragment(text, 110.0, row(index), 60.0));
        }
    }

    fragments
}

/// Height of one fixture record including spacing.
pub const RECORD_HEIGHT: f64 = 250.0;
