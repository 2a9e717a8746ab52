//! Offline draft document templates
//!
//! Drafts are generated from fixed skeletons with caller-supplied field
//! substitution - no AI involved. Unknown template kinds yield `None` and the
//! caller maps that to a validation error.

use std::collections::BTreeMap;

/// Template kinds and their display names
pub const DRAFT_TEMPLATES: &[(&str, &str)] = &[
    ("rent", "Rental Agreement"),
    ("sale", "Sale Deed"),
    ("partnership", "Partnership Deed"),
    ("employment", "Employment Contract"),
    ("nda", "Non-Disclosure Agreement"),
    ("loan", "Loan Agreement"),
    ("legal_notice", "Legal Notice"),
    ("affidavit", "Affidavit"),
];

/// Display name for a template kind
pub fn template_name(kind: &str) -> Option<&'static str> {
    DRAFT_TEMPLATES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, name)| *name)
}

fn field<'a>(inputs: &'a BTreeMap<String, String>, key: &str) -> &'a str {
    inputs.get(key).map(String::as_str).unwrap_or("__________")
}

/// Generate a draft document body for a template kind
///
/// Returns `None` for an unknown kind. Missing fields render as blanks so the
/// document stays usable as a fill-in form.
pub fn generate_document(kind: &str, inputs: &BTreeMap<String, String>) -> Option<String> {
    let f = |key: &str| field(inputs, key).to_string();
    let body = match kind {
        "rent" => format!(
            "RENTAL AGREEMENT\n\n\
             This Rental Agreement is executed on {date} between {landlord} (hereinafter \"the Lessor\") \
             and {tenant} (hereinafter \"the Lessee\").\n\n\
             1. The Lessor lets out the premises at {address} to the Lessee for residential use.\n\
             2. The monthly rent shall be Rs. {rent}, payable in advance on or before the 5th of each month.\n\
             3. The Lessee has deposited Rs. {deposit} as interest-free refundable security.\n\
             4. The tenancy commences on {start_date} for a period of {duration} months.\n\
             5. Either party may terminate this agreement by giving one month's written notice.\n\
             6. The Lessee shall not sublet the premises or carry out structural alterations without consent.\n\n\
             IN WITNESS WHEREOF the parties have signed this agreement on the date first written above.\n\n\
             LESSOR: {landlord}\nLESSEE: {tenant}\n\nWITNESSES:\n1. __________\n2. __________",
            date = f("date"), landlord = f("landlord"), tenant = f("tenant"),
            address = f("address"), rent = f("rent"), deposit = f("deposit"),
            start_date = f("start_date"), duration = f("duration"),
        ),
        "sale" => format!(
            "SALE DEED\n\n\
             This Sale Deed is executed on {date} between {seller} (hereinafter \"the Vendor\") \
             and {buyer} (hereinafter \"the Vendee\").\n\n\
             1. The Vendor conveys absolutely the property at {property} to the Vendee.\n\
             2. The total sale consideration is Rs. {amount}, receipt of which the Vendor acknowledges.\n\
             3. The Vendor covenants that the property is free from all encumbrances, charges and liens.\n\
             4. Vacant possession has been delivered to the Vendee on execution of this deed.\n\n\
             VENDOR: {seller}\nVENDEE: {buyer}\n\nWITNESSES:\n1. __________\n2. __________",
            date = f("date"), seller = f("seller"), buyer = f("buyer"),
            property = f("property"), amount = f("amount"),
        ),
        "partnership" => format!(
            "PARTNERSHIP DEED\n\n\
             This Deed of Partnership is made on {date} between {partner_a} and {partner_b} \
             (hereinafter collectively \"the Partners\").\n\n\
             1. The Partners shall carry on the business of {business} under the name and style of {firm_name}.\n\
             2. The capital of the firm shall be Rs. {capital}, contributed in equal shares unless agreed otherwise.\n\
             3. Profits and losses shall be shared {profit_split}.\n\
             4. The firm's accounts shall be closed on 31st March each year.\n\
             5. Disputes shall be referred to arbitration under the Arbitration and Conciliation Act, 1996.\n\n\
             PARTNER: {partner_a}\nPARTNER: {partner_b}",
            date = f("date"), partner_a = f("partner_a"), partner_b = f("partner_b"),
            business = f("business"), firm_name = f("firm_name"),
            capital = f("capital"), profit_split = f("profit_split"),
        ),
        "employment" => format!(
            "EMPLOYMENT CONTRACT\n\n\
             This Employment Contract is entered into on {date} between {employer} (\"the Employer\") \
             and {employee} (\"the Employee\").\n\n\
             1. The Employee is appointed to the post of {designation} with effect from {start_date}.\n\
             2. The Employee shall be paid a gross salary of Rs. {salary} per month.\n\
             3. The first {probation} months shall be a period of probation.\n\
             4. Either party may terminate this contract with {notice_period} notice in writing.\n\
             5. The Employee shall maintain strict confidentiality of the Employer's business information.\n\n\
             EMPLOYER: {employer}\nEMPLOYEE: {employee}",
            date = f("date"), employer = f("employer"), employee = f("employee"),
            designation = f("designation"), start_date = f("start_date"),
            salary = f("salary"), probation = f("probation"), notice_period = f("notice_period"),
        ),
        "nda" => format!(
            "NON-DISCLOSURE AGREEMENT\n\n\
             This Non-Disclosure Agreement is made on {date} between {party_a} (\"the Disclosing Party\") \
             and {party_b} (\"the Receiving Party\").\n\n\
             1. \"Confidential Information\" means all information relating to {subject} disclosed by the \
             Disclosing Party, whether oral, written or electronic.\n\
             2. The Receiving Party shall use Confidential Information solely for {purpose} and for no other purpose.\n\
             3. This obligation survives for {duration} years from the date of disclosure.\n\
             4. Breach entitles the Disclosing Party to injunctive relief in addition to damages.\n\n\
             DISCLOSING PARTY: {party_a}\nRECEIVING PARTY: {party_b}",
            date = f("date"), party_a = f("party_a"), party_b = f("party_b"),
            subject = f("subject"), purpose = f("purpose"), duration = f("duration"),
        ),
        "loan" => format!(
            "LOAN AGREEMENT\n\n\
             This Loan Agreement is executed on {date} between {lender} (\"the Lender\") \
             and {borrower} (\"the Borrower\").\n\n\
             1. The Lender has advanced a loan of Rs. {amount} to the Borrower.\n\
             2. The loan carries simple interest at {interest}% per annum.\n\
             3. The Borrower shall repay the loan with interest on or before {due_date}.\n\
             4. On default, the entire outstanding amount becomes immediately due and payable.\n\n\
             LENDER: {lender}\nBORROWER: {borrower}\n\nWITNESSES:\n1. __________\n2. __________",
            date = f("date"), lender = f("lender"), borrower = f("borrower"),
            amount = f("amount"), interest = f("interest"), due_date = f("due_date"),
        ),
        "legal_notice" => format!(
            "LEGAL NOTICE\n\nDate: {date}\n\nTo,\n{recipient}\n{recipient_address}\n\n\
             UNDER INSTRUCTIONS FROM AND ON BEHALF OF my client {client}, I hereby serve you with the \
             following notice:\n\n\
             1. {subject}\n\n\
             2. {details}\n\n\
             3. You are hereby called upon to comply with the above demand within {deadline} days of receipt \
             of this notice, failing which my client shall be constrained to initiate appropriate legal \
             proceedings against you, civil and/or criminal, entirely at your risk as to costs and consequences.\n\n\
             ADVOCATE\n(Name, Enrolment No. and Address)",
            date = f("date"), recipient = f("recipient"), recipient_address = f("recipient_address"),
            client = f("client"), subject = f("subject"), details = f("details"), deadline = f("deadline"),
        ),
        "affidavit" => format!(
            "AFFIDAVIT\n\n\
             I, {deponent}, aged {age} years, residing at {address}, do hereby solemnly affirm and state \
             as under:\n\n\
             1. That I am the deponent herein and am well conversant with the facts of the case.\n\
             2. {statement}\n\
             3. That the contents of this affidavit are true and correct to the best of my knowledge and \
             belief and nothing material has been concealed therefrom.\n\n\
             DEPONENT\n\nVERIFICATION\n\
             Verified at {place} on {date} that the contents of the above affidavit are true and correct.\n\n\
             DEPONENT",
            deponent = f("deponent"), age = f("age"), address = f("address"),
            statement = f("statement"), place = f("place"), date = f("date"),
        ),
        _ => return None,
    };
    Some(body)
}
