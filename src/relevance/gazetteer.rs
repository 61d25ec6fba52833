//! Legal terminology used to judge whether text is about a judgment.
//!
//! Matching is by lower-cased substring, so short entries such as `"vs"` or `"act"` also match
//! inside longer words. Each entry is unique; phrases like `"right to"` are kept alongside their
//! head words.

/// Terms and phrases counted by [`super::legal_term_count`].
pub const LEGAL_TERMS: &[&str] = &[
    // Courts and benches
    "court", "judgment", "judge", "bench", "hon'ble", "honorable", "justice", "chief justice", "j.",
    "cj", "division bench", "full bench", "single bench", "coram", "jurisdiction",
    "original jurisdiction", "appellate jurisdiction", "writ jurisdiction", "revision", "review",
    "curative petition", "special leave petition", "slp", "civil appeal", "criminal appeal",
    "letters patent appeal", "lpa", "review petition",
    // Parties and captions
    "case no.", "in the matter of", "versus", "vs", "v.", "petitioner", "respondent", "appellant",
    "appellee", "complainant", "accused", "defendant", "plaintiff", "applicant", "opposite party",
    "op", "intervenor", "amicus curiae", "next friend", "pro forma respondent",
    // Parts of a judgment
    "headnote", "citation", "facts", "issues", "arguments", "submissions", "contentions",
    "pleadings", "evidence", "exhibits", "affidavit", "deposition", "testimony", "witness",
    "examination", "cross-examination", "reexamination", "documents", "annexures", "schedules",
    "appendices", "preamble", "recitals", "operative portion", "ratio decidendi", "obiter dicta",
    "holding", "findings", "conclusions", "decision", "order", "decree", "final order",
    "interim order", "injunction", "stay", "bail", "remand", "custody", "parole", "probation",
    // Procedure and disposal
    "filing", "institution", "commencement", "cause of action", "limitation", "prescription",
    "res judicata", "lis pendens", "sub judice", "stare decisis", "precedent", "binding precedent",
    "persuasive precedent", "distinguished", "overruled", "reversed", "affirmed", "modified",
    "remanded", "disposed", "dismissed", "allowed", "partly allowed", "quashed", "set aside",
    "annulled", "struck down", "upheld", "sustained", "vacated", "withdrawn",
    // Constitutional
    "constitution", "constitutional", "unconstitutional", "ultra vires", "intra vires",
    "basic structure", "fundamental rights", "directive principles", "fundamental duties", "writ",
    "habeas corpus", "mandamus", "prohibition", "certiorari", "quo warranto", "article 14",
    "article 19", "article 21", "article 32", "article 226", "article 136", "article 142",
    "article 144", "separation of powers", "judicial review", "rule of law", "due process",
    "equal protection", "reasonable restriction", "public interest", "doctrine of eclipse",
    "doctrine of severability", "colourable legislation",
    // Civil
    "civil procedure code", "cpc", "rule", "section", "appeal", "execution", "plaint",
    "written statement", "counter claim", "set off", "interlocutory", "interim relief",
    "temporary injunction", "permanent injunction", "specific performance", "declaration",
    "damages", "compensation", "mesne profits", "restitution", "receiver", "commission",
    "discovery", "interrogatories", "admission", "denial", "ex parte", "ex parte decree",
    "ex parte order", "setting aside ex parte",
    // Criminal
    "criminal procedure code", "crpc", "indian penal code", "ipc", "section 302", "section 304",
    "section 307", "section 376", "section 420", "section 498a", "bailable", "non-bailable",
    "cognizable", "non-cognizable", "fir", "charge sheet", "charges", "framing of charges",
    "discharge", "acquittal", "conviction", "sentence", "death sentence", "life imprisonment",
    "fine", "remission", "commutation", "suspension", "anticipatory bail", "regular bail",
    "default bail", "custodial interrogation", "police custody", "judicial custody", "compounding",
    "quashing",
    // Evidence
    "indian evidence act", "proof", "burden of proof", "onus of proof", "standard of proof",
    "presumption", "rebuttable", "irrebuttable", "documentary evidence", "oral evidence",
    "expert evidence", "circumstantial evidence", "direct evidence", "hearsay", "confession",
    "dying declaration", "hostile witness", "leading question", "cross examination", "exhibit",
    "marking", "identification", "proof of document", "secondary evidence", "primary evidence",
    // Contract
    "indian contract act", "contract", "agreement", "offer", "acceptance", "consideration",
    "competent parties", "free consent", "coercion", "undue influence", "fraud",
    "misrepresentation", "mistake", "void", "voidable", "unenforceable", "quasi contract",
    "liquidated damages", "penalty", "rescission", "rectification", "quantum meruit", "breach",
    "anticipatory", "actual breach", "remedies",
    // Property
    "transfer of property act", "topa", "sale", "mortgage", "lease", "gift", "exchange", "license",
    "easement", "adverse possession", "title", "ownership", "possession", "constructive possession",
    "joint possession", "co-ownership", "coparcenary", "partition", "will", "testament", "codicil",
    "probate", "letters of administration", "succession", "inheritance", "heir", "legatee",
    "devisee", "bequest", "settlement", "trust", "beneficiary", "trustee", "endowment",
    // Company
    "companies act", "memorandum", "articles", "incorporation", "registration", "director",
    "managing director", "whole-time director", "independent director", "nominee director",
    "board of directors", "general meeting", "agm", "egm", "resolution", "ordinary resolution",
    "special resolution", "shareholder", "member", "share", "equity share", "preference share",
    "debenture", "charge", "lien", "floating charge", "fixed charge", "winding up",
    "voluntary winding up", "compulsory winding up", "liquidation", "official liquidator",
    "insolvency", "bankruptcy", "resolution professional", "liquidator", "winding up petition",
    "oppression and mismanagement", "nclt", "nclat",
    // Intellectual property
    "patent", "copyright", "trademark", "design", "geographical indication", "infringement",
    "passing off", "counterfeiting", "piracy", "plagiarism", "assignment", "compulsory license",
    "royalty", "anticipatory injunction", "account of profits", "seizure", "destruction",
    // Labour and industrial
    "industrial disputes act", "ida", "workman", "employer", "employee", "industrial dispute",
    "strike", "lockout", "layoff", "retrenchment", "closure", "transfer", "gratuity", "bonus",
    "provident fund", "esic", "epf", "minimum wages", "equal remuneration", "sexual harassment",
    "disciplinary proceedings", "domestic enquiry", "punishment", "dismissal", "termination",
    "reinstatement", "back wages", "conciliation", "arbitration", "adjudication", "labour court",
    "industrial tribunal", "national tribunal", "collective bargaining", "award", "implementation",
    "enforcement",
    // Tax
    "income tax act", "gst", "vat", "customs", "excise", "service tax", "assessment",
    "reassessment", "scrutiny", "regular assessment", "best judgment assessment", "advance ruling",
    "settlement commission", "tax evasion", "tax avoidance", "prosecution", "recovery",
    "attachment", "garnishee", "refund", "tribunal", "high court", "supreme court",
    // Arbitration
    "mediation", "setting aside", "arbitrator", "umpire", "arbitral tribunal",
    "arbitration agreement", "seat", "venue", "competence", "competence-competence",
    "interim measures", "emergency arbitrator", "final award", "partial award", "interest", "costs",
    "challenge", "neutrality", "impartiality", "independence", "disclosure",
    // International
    "treaty", "convention", "protocol", "united nations", "general assembly", "security council",
    "international court of justice", "pcij", "icj", "good offices", "diplomatic protection",
    "state responsibility", "immunity", "sovereign immunity", "extradition",
    "mutual legal assistance", "human rights", "refugee", "asylum", "extra-territorial",
    "exhaustion of local remedies",
    // Maxims
    "actus reus", "mens rea", "audi alteram partem", "nemo judex in causa sua", "res ipsa loquitur",
    "uberrima fides", "caveat emptor", "ignorantia juris non excusat", "de minimis non curat lex",
    "expressio unius est exclusio alterius", "ejusdem generis", "noscitur a sociis", "pari materia",
    "in pari delicto", "volenti non fit injuria", "damnum sine injuria", "injuria sine damno",
    "qui facit per alium facit per se", "respondeat superior",
    // Industrial disputes and bonus
    "appeal no. 790 of 1957", "civil misc writ no. 280 of 1950", "u.p. industrial disputes act",
    "xxviii of 1947", "court of inquiry", "allahabad high court", "mudholkar j.", "bhargava j.",
    "sapru j.", "state of uttar pradesh", "indian sugar millers association",
    "indian national sugar mills workers federation", "sugar factories", "bonus payment",
    "retaining allowance", "seasonal workmen", "clerical staff", "strike notice",
    "gazette notification", "writ petition", "article 133", "constitutional validity",
    "discrimination", "arbitrary", "emergency", "prospective", "retrospective", "minimum wages act",
    "terms of employment", "conditions of employment", "certificate", "constitution bench",
    // Question phrasing
    "explain", "clarify", "interpret", "define", "what does", "meaning of", "how to",
    "procedure for", "requirements for", "eligibility for", "criteria for", "difference between",
    "similarities between", "compare", "contrast", "examples of", "types of", "categories of",
    "applicability of", "scope of", "limitations of", "exceptions to", "validity of",
    "enforceability of", "consequences of", "penalty for", "remedy for", "solution for",
    "process for", "steps to", "guide to", "analysis of", "breakdown of", "summary of",
    "overview of", "key points", "main arguments", "legal basis", "grounds for",
    "justification for", "rationale behind", "purpose of", "intent behind", "objective of",
    "effect of", "impact of", "implications of", "significance of", "importance of", "relevance of",
    "connection between", "relationship between", "correlation between", "cause of", "reason for",
    "basis for", "foundation of", "principle behind", "doctrine of", "theory of", "concept of",
    "aspects of", "elements of", "components of", "factors in", "considerations for",
    "requirements of", "conditions for", "terms of", "provisions of", "clauses in", "sections in",
    "articles in", "rules in", "regulations in", "guidelines for", "standards for",
    "benchmarks for", "precedents for", "case law on", "jurisprudence on", "legal opinion on",
    "view on", "position on", "stance on", "interpretation of", "construction of", "reading of",
    "understanding of", "comprehension of", "application of", "implementation of", "execution of",
    "enforcement of", "compliance with", "adherence to", "obligation to", "right to",
    "entitlement to", "privilege of", "immunity from", "exception to", "exemption from",
    "derogation from", "deviation from", "variation of", "modification of", "amendment to",
    "revision of", "update to", "change in", "development in", "trend in", "pattern in",
    "practice of", "custom of", "usage of", "tradition of", "convention of", "norm of",
    "standard of", "measure of", "test for", "benchmark for", "yardstick for", "indicator of",
    "evidence of", "proof of", "verification of", "confirmation of", "validation of",
    "authentication of", "certification of", "approval of", "authorization of", "sanction of",
    "ratification of", "endorsement of", "support for", "opposition to", "objection to",
    "challenge to", "appeal against", "review of", "reconsideration of", "reformation of",
    "rectification of", "correction of", "amendment of", "alteration of", "change to",
    "adjustment to", "adaptation of", "transformation of", "conversion of", "translation of",
    "paraphrase of", "abstract of", "synopsis of", "outline of", "introduction to", "background of",
    "context of", "framework of", "structure of", "organization of", "hierarchy of",
    "classification of", "categorization of", "typology of", "taxonomy of", "nomenclature of",
    "terminology of", "vocabulary of", "glossary of", "dictionary of", "lexicon of", "thesaurus of",
    "encyclopedia of", "compendium of", "digest of", "manual of", "handbook of", "guidebook of",
    "textbook of", "treatise on", "monograph on", "dissertation on", "thesis on", "paper on",
    "article on", "essay on", "commentary on", "annotation of", "exegesis of", "hermeneutics of",
    "examination of", "investigation of", "inquiry into", "research on", "study of", "survey of",
    "report on", "finding of", "conclusion of", "recommendation of", "suggestion for",
    "proposal for", "plan for", "strategy for", "approach to", "method for", "technique for",
    "system for", "framework for", "model for", "paradigm for", "template for", "prototype for",
    "example of", "instance of", "case of", "illustration of", "demonstration of", "exposition of",
    "explanation of", "clarification of", "elucidation of", "simplification of",
    "deconstruction of", "reconstruction of", "synthesis of", "integration of", "unification of",
    "harmonization of", "reconciliation of", "alignment of", "coordination of", "orchestration of",
    "management of", "administration of", "governance of", "regulation of", "control of",
    "supervision of", "oversight of", "monitoring of", "evaluation of", "assessment of",
    "appraisal of", "audit of", "inspection of", "scrutiny of", "accreditation of", "licensing of",
    "affirmation of", "declaration of", "pronouncement of", "announcement of", "publication of",
    "dissemination of", "distribution of", "circulation of", "promulgation of", "enactment of",
    "legislation of", "ordinance of", "decree of", "edict of", "proclamation of", "notification of",
    "directive of", "instruction of", "order of", "command of", "injunction of", "mandate of",
    "requirement of", "obligation of", "duty of", "responsibility of", "accountability of",
    "liability of", "culpability of", "blameworthiness of", "fault of", "negligence of",
    "recklessness of", "intent of", "motive of", "origin of", "source of", "basis of", "ground of",
    "rationale for", "explanation for", "defense of", "excuse for", "pretext for", "alibi for",
    "vindication of", "exoneration of", "absolution of", "acquittal of", "discharge of",
    "release from", "liberation from", "emancipation from", "freedom from", "departure from",
    "variation from", "appreciation of", "recognition of", "acknowledgment of", "admission of",
    "concession of", "confession of", "disclosure of", "revelation of", "exposure of",
    "discovery of", "determination of", "resolution of", "decision on", "judgment on", "ruling on",
    "verdict on", "sentence on", "order on", "decree on", "pronouncement on", "declaration on",
    "announcement on", "issuance of", "delivery of", "service of", "filing of", "submission of",
    "presentation of", "tender of", "offer of", "proposal of", "suggestion of", "advice on",
    "counsel on", "guidance on", "direction on", "instruction on", "command on", "injunction on",
    "mandate on", "requirement on", "demand for", "request for", "petition for", "application for",
    "appeal for", "plea for", "prayer for", "suit for", "action for", "case for", "matter of",
    "issue of", "question of", "point of", "aspect of", "element of", "factor in", "component of",
    "ingredient of", "feature of", "characteristic of", "attribute of", "quality of", "property of",
    "trait of", "mark of", "sign of", "indication of", "attestation of", "witnessing of",
    "observation of", "perception of", "view of", "opinion of", "belief of", "conviction of",
    "position of", "stance of", "attitude toward", "industrial", "act", "payment", "law",
    "government",
];
